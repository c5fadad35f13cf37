mod services {
    use aot_routes::group;
    use axum::extract::{Extension, Path};

    #[derive(Clone, Default)]
    pub struct TodoService;

    #[group("todo")]
    impl TodoService {
        #[get("/")]
        pub fn get_all(&self) -> String {
            String::new()
        }

        #[get("/{id}")]
        pub async fn get_by_id(&self, id: Path<i32>) -> String {
            id.to_string()
        }

        #[put("/{id}")]
        pub async fn update(&self, Extension(current): Extension<Self>, id: Path<i32>) -> String {
            current.get_by_id(id).await
        }

        #[delete("/{id}")]
        pub fn remove(&self, _id: Path<i32>) {}

        pub fn create() -> &'static str {
            "created"
        }
    }

    #[derive(Default)]
    pub struct BlogService;

    #[group("/blog/")]
    impl BlogService {
        #[get("/")]
        #[post("/")]
        pub fn index(&self) -> &'static str {
            "blog"
        }

        #[post("/")]
        pub async fn publish() -> &'static str {
            "published"
        }
    }

    #[derive(Default)]
    pub struct HealthService;

    #[group("")]
    impl HealthService {
        #[get("/health")]
        pub fn health(&self) -> &'static str {
            "ok"
        }
    }

    pub struct Unrelated;

    impl Unrelated {
        #[aot_routes::get("/ignored")]
        pub fn ignored(&self) {}
    }
}

fn main() {
    let _app: axum::Router = set_map(axum::Router::new());
}
