//! [ProgramModel] built by parsing the sources of a Cargo package. The module trees of the library
//! target (if any) and the entry target are walked in declaration order, starting at their root
//! files and following `mod` declarations. Every inherent `impl` block becomes a declared type.
//!
//! Names are resolved the way a reader of a single module would resolve them: through the `use`
//! items of the module and the items it declares. Anything else, e.g. primitives, prelude types or
//! glob imports, is kept as written. Paths are rendered relative to the entry target, so types
//! from the library target are spelled with the library crate name.

use crate::error::GeneratorError;
use crate::model::{
    Annotation, DeclarationId, EntryPoint, MethodDeclaration, Parameter, ProgramModel,
    TypeDeclaration,
};
use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use quote::{format_ident, ToTokens};
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::visit_mut::{self, VisitMut};
use syn::{
    Attribute, Expr, ExprLit, FnArg, ImplItem, ImplItemFn, Item, ItemImpl, Lit, Meta, Pat,
    PathSegment, Type, TypePath, UseTree,
};
use tracing::{debug, warn};

const ENTRY_POINT: &str = "main";
const MOD_RS: &str = "mod.rs";

/// Location of the sources of a package.
#[derive(Clone, Debug)]
pub struct SourceLayout {
    /// Root directory of the package.
    pub root: PathBuf,
    /// Root file of the target containing the entry point, relative to [root](Self::root).
    pub entry_file: PathBuf,
    /// Root file of the library target, relative to [root](Self::root). Ignored if missing.
    pub library_file: Option<PathBuf>,
    /// Crate name of the library target, used to reference its items from the entry target.
    pub library_name: Option<String>,
}

impl SourceLayout {
    /// Default layout of a package with a `src/main.rs` binary and an optional `src/lib.rs`
    /// library.
    pub fn new(root: impl Into<PathBuf>, package_name: Option<&str>) -> Self {
        Self {
            root: root.into(),
            entry_file: PathBuf::from("src/main.rs"),
            library_file: Some(PathBuf::from("src/lib.rs")),
            library_name: package_name.map(|name| name.replace('-', "_")),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
enum Target {
    Library,
    Entry,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
enum PathRoot {
    Crate(Target),
    Extern,
}

/// Absolute path of an item.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct ItemPath {
    root: PathRoot,
    segments: Vec<String>,
}

impl ItemPath {
    fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self {
            root: self.root.clone(),
            segments,
        }
    }

    fn join(&self, segments: &[String]) -> Self {
        let mut result = self.clone();
        result.segments.extend_from_slice(segments);
        result
    }

    /// Leading path segments as seen from the entry target.
    fn anchored_root(&self, library_name: Option<&str>) -> (bool, Vec<String>) {
        match (&self.root, library_name) {
            (PathRoot::Crate(Target::Library), Some(library_name)) => {
                (true, vec![library_name.to_string()])
            }
            (PathRoot::Crate(_), _) => (false, vec!["crate".to_string()]),
            (PathRoot::Extern, _) => (true, Vec::new()),
        }
    }

    fn render(&self, library_name: Option<&str>) -> String {
        let (leading_colon, root) = self.anchored_root(library_name);
        let path = root
            .iter()
            .chain(&self.segments)
            .join("::");

        if leading_colon {
            format!("::{path}")
        } else {
            path
        }
    }

    fn to_syn_path(&self, library_name: Option<&str>) -> syn::Path {
        let (leading_colon, root) = self.anchored_root(library_name);
        let segments = root
            .iter()
            .chain(&self.segments)
            .map(|segment| PathSegment::from(format_ident!("{}", segment)))
            .collect::<Punctuated<_, _>>();

        syn::Path {
            leading_colon: leading_colon.then(Default::default),
            segments,
        }
    }
}

/// Names visible in a module.
#[derive(Clone, Debug)]
struct ModuleScope {
    path: ItemPath,
    imports: FxHashMap<String, ItemPath>,
    declared: FxHashSet<String>,
}

impl ModuleScope {
    fn new(path: ItemPath, items: &[Item]) -> Self {
        let declared = items.iter().filter_map(declared_name).collect();
        let mut scope = Self {
            path,
            imports: Default::default(),
            declared,
        };

        for item in items {
            if let Item::Use(item_use) = item {
                let prefix = if item_use.leading_colon.is_some() {
                    vec![String::new()]
                } else {
                    Vec::new()
                };
                scope.collect_imports(&item_use.tree, prefix);
            }
        }

        scope
    }

    fn collect_imports(&mut self, tree: &UseTree, mut prefix: Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.collect_imports(&path.tree, prefix);
            }
            UseTree::Name(name) => {
                let alias = if name.ident == "self" {
                    prefix.last().cloned()
                } else {
                    prefix.push(name.ident.to_string());
                    Some(name.ident.to_string())
                };

                if let (Some(alias), Some(path)) = (alias, self.absolute(&prefix)) {
                    self.imports.insert(alias, path);
                }
            }
            UseTree::Rename(rename) => {
                if rename.ident != "self" {
                    prefix.push(rename.ident.to_string());
                }

                if let Some(path) = self.absolute(&prefix) {
                    self.imports.insert(rename.rename.to_string(), path);
                }
            }
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.collect_imports(tree, prefix.clone());
                }
            }
            UseTree::Glob(_) => {}
        }
    }

    /// Makes a path written in this module absolute. The first segment may be empty for paths with
    /// a leading `::`.
    fn absolute(&self, segments: &[String]) -> Option<ItemPath> {
        let (first, rest) = segments.split_first()?;
        match first.as_str() {
            "" => Some(ItemPath {
                root: PathRoot::Extern,
                segments: rest.to_vec(),
            }),
            "crate" => Some(ItemPath {
                root: self.path.root.clone(),
                segments: rest.to_vec(),
            }),
            "self" => Some(self.path.join(rest)),
            "super" => {
                let mut path = self.path.parent();
                let mut rest = rest;
                while let Some((next, remaining)) = rest.split_first() {
                    if next != "super" {
                        break;
                    }

                    path = path.parent();
                    rest = remaining;
                }

                Some(path.join(rest))
            }
            "Self" => None,
            _ => {
                if let Some(import) = self.imports.get(first) {
                    Some(import.join(rest))
                } else if self.declared.contains(first) {
                    Some(self.path.join(segments))
                } else {
                    Some(ItemPath {
                        root: PathRoot::Extern,
                        segments: segments.to_vec(),
                    })
                }
            }
        }
    }

    /// Resolves a path used in a signature. Unknown first segments are left to the compiler.
    fn resolve(&self, segments: &[String]) -> Option<ItemPath> {
        let first = segments.first()?;
        let is_known = matches!(first.as_str(), "crate" | "self" | "super")
            || self.imports.contains_key(first)
            || self.declared.contains(first);

        if is_known {
            self.absolute(segments)
        } else {
            None
        }
    }
}

fn declared_name(item: &Item) -> Option<String> {
    match item {
        Item::Struct(item) => Some(item.ident.to_string()),
        Item::Enum(item) => Some(item.ident.to_string()),
        Item::Union(item) => Some(item.ident.to_string()),
        Item::Type(item) => Some(item.ident.to_string()),
        Item::Trait(item) => Some(item.ident.to_string()),
        Item::Mod(item) => Some(item.ident.to_string()),
        _ => None,
    }
}

fn path_segments(path: &syn::Path) -> Vec<String> {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect()
}

/// Rewrites type paths to their absolute form. `Self` is replaced with the type of the enclosing
/// impl block.
struct QualifyPaths<'a> {
    scope: &'a ModuleScope,
    self_type: &'a ItemPath,
    library_name: Option<&'a str>,
}

impl VisitMut for QualifyPaths<'_> {
    fn visit_type_path_mut(&mut self, node: &mut TypePath) {
        visit_mut::visit_type_path_mut(self, node);

        if node.qself.is_some() || node.path.leading_colon.is_some() {
            return;
        }

        let segments = path_segments(&node.path);
        let Some(first) = segments.first() else {
            return;
        };

        // a run of `super` segments is resolved as a whole
        let consumed = if first == "super" {
            segments
                .iter()
                .take_while(|segment| *segment == "super")
                .count()
        } else {
            1
        };

        let resolved = if first == "Self" {
            Some(self.self_type.clone())
        } else {
            self.scope.resolve(&segments[..consumed])
        };
        let Some(resolved) = resolved else {
            return;
        };

        let mut path = resolved.to_syn_path(self.library_name);
        let mut original = mem::take(&mut node.path.segments).into_iter();
        if let (Some(last_consumed), Some(last)) =
            (original.nth(consumed - 1), path.segments.last_mut())
        {
            last.arguments = last_consumed.arguments;
        }

        path.segments.extend(original);
        node.path = path;
    }
}

fn annotation(attribute: &Attribute) -> Annotation {
    let name = path_segments(attribute.path()).join("::");
    let arguments = match &attribute.meta {
        Meta::Path(_) => String::new(),
        Meta::List(list) => list.tokens.to_string(),
        Meta::NameValue(name_value) => name_value.value.to_token_stream().to_string(),
    };

    Annotation::new(name, arguments)
}

fn path_attribute(attributes: &[Attribute]) -> Option<String> {
    attributes.iter().find_map(|attribute| match &attribute.meta {
        Meta::NameValue(name_value) if name_value.path.is_ident("path") => {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(path),
                ..
            }) = &name_value.value
            {
                Some(path.value())
            } else {
                None
            }
        }
        _ => None,
    })
}

/// A module file waiting to be parsed.
struct ModuleFile {
    file: PathBuf,
    /// Directory containing files of child modules.
    children: PathBuf,
    /// Is the module an inline `mod { ... }` block inside the file.
    inline: bool,
}

/// [ProgramModel] of a Cargo package.
#[derive(Clone, Debug, Default)]
pub struct SourceProgram {
    types: Vec<TypeDeclaration>,
    type_paths: Vec<ItemPath>,
    entry_point: Option<EntryPoint>,
    library_name: Option<String>,
    files: Vec<PathBuf>,
}

impl SourceProgram {
    /// Parses all module files of the package. A missing entry file results in a program without
    /// an entry point, while a missing module file is skipped.
    pub fn load(layout: &SourceLayout) -> Result<Self, GeneratorError> {
        let mut program = Self {
            library_name: layout.library_name.clone(),
            ..Default::default()
        };

        let mut loaded = FxHashSet::default();
        if let Some(library_file) = &layout.library_file {
            let library_file = layout.root.join(library_file);
            if library_file.is_file() {
                program.load_target(Target::Library, library_file, &mut loaded)?;
            }
        }

        let entry_file = layout.root.join(&layout.entry_file);
        if entry_file.is_file() {
            program.load_target(Target::Entry, entry_file, &mut loaded)?;
        } else {
            warn!(path = %entry_file.display(), "Missing entry file.");
        }

        Ok(program)
    }

    /// All files read while loading the program.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    fn load_target(
        &mut self,
        target: Target,
        file: PathBuf,
        loaded: &mut FxHashSet<PathBuf>,
    ) -> Result<(), GeneratorError> {
        let children = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let root = ItemPath {
            root: PathRoot::Crate(target),
            segments: Vec::new(),
        };

        self.load_file(
            target,
            ModuleFile {
                file,
                children,
                inline: false,
            },
            root,
            loaded,
        )
    }

    fn load_file(
        &mut self,
        target: Target,
        module: ModuleFile,
        path: ItemPath,
        loaded: &mut FxHashSet<PathBuf>,
    ) -> Result<(), GeneratorError> {
        if !loaded.insert(module.file.clone()) {
            debug!(path = %module.file.display(), "Skipping module file loaded by another target.");
            return Ok(());
        }

        let content = fs::read_to_string(&module.file).map_err(|source| GeneratorError::Io {
            path: module.file.clone(),
            source,
        })?;
        let file = syn::parse_file(&content).map_err(|source| GeneratorError::Parse {
            path: module.file.clone(),
            source,
        })?;

        debug!(path = %module.file.display(), "Loaded module file.");
        self.files.push(module.file.clone());

        if target == Target::Entry && path.segments.is_empty() {
            let has_main = file
                .items
                .iter()
                .any(|item| matches!(item, Item::Fn(function) if function.sig.ident == ENTRY_POINT));
            if has_main {
                self.entry_point = Some(EntryPoint::new(
                    ENTRY_POINT.to_string(),
                    path.render(self.library_name.as_deref()),
                ));
            }
        }

        self.load_items(target, &file.items, &module, path, loaded)
    }

    fn load_items(
        &mut self,
        target: Target,
        items: &[Item],
        module: &ModuleFile,
        path: ItemPath,
        loaded: &mut FxHashSet<PathBuf>,
    ) -> Result<(), GeneratorError> {
        let scope = ModuleScope::new(path, items);

        for item in items {
            match item {
                Item::Impl(item_impl) if item_impl.trait_.is_none() => {
                    self.declare_impl(item_impl, &scope);
                }
                Item::Mod(item_mod) => {
                    let name = item_mod.ident.to_string();
                    let child_path = scope.path.join(&[name.clone()]);
                    let children = module.children.join(&name);

                    if let Some((_, items)) = &item_mod.content {
                        let child = ModuleFile {
                            file: module.file.clone(),
                            children,
                            inline: true,
                        };
                        self.load_items(target, items, &child, child_path, loaded)?;
                    } else if let Some(child) = locate_module(module, &name, &item_mod.attrs) {
                        self.load_file(target, child, child_path, loaded)?;
                    } else {
                        warn!(module = %name, path = %module.file.display(), "Cannot find module file.");
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn declare_impl(&mut self, item_impl: &ItemImpl, scope: &ModuleScope) {
        let Type::Path(self_type) = item_impl.self_ty.as_ref() else {
            return;
        };

        if self_type.qself.is_some() {
            return;
        }

        let Some(name) = self_type.path.segments.last().map(|segment| segment.ident.to_string())
        else {
            return;
        };

        let type_path = scope
            .resolve(&path_segments(&self_type.path))
            .unwrap_or_else(|| scope.path.join(&[name.clone()]));

        let methods = item_impl
            .items
            .iter()
            .filter_map(|item| match item {
                ImplItem::Fn(function) => Some(self.method(function, scope, &type_path)),
                _ => None,
            })
            .collect();

        self.types.push(TypeDeclaration {
            id: DeclarationId(self.types.len()),
            name,
            annotations: item_impl.attrs.iter().map(annotation).collect(),
            methods,
        });
        self.type_paths.push(type_path);
    }

    fn method(
        &self,
        function: &ImplItemFn,
        scope: &ModuleScope,
        self_type: &ItemPath,
    ) -> MethodDeclaration {
        let mut qualify = QualifyPaths {
            scope,
            self_type,
            library_name: self.library_name.as_deref(),
        };

        let parameters = function
            .sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                FnArg::Typed(pat_type) => Some(pat_type),
                FnArg::Receiver(_) => None,
            })
            .enumerate()
            .map(|(index, pat_type)| {
                let name = match pat_type.pat.as_ref() {
                    Pat::Ident(pat) if pat.subpat.is_none() => pat.ident.to_string(),
                    _ => format!("arg{index}"),
                };

                let mut ty = pat_type.ty.as_ref().clone();
                qualify.visit_type_mut(&mut ty);

                Parameter::new(name, ty.to_token_stream().to_string())
            })
            .collect();

        MethodDeclaration {
            name: function.sig.ident.to_string(),
            annotations: function.attrs.iter().map(annotation).collect(),
            parameters,
            is_async: function.sig.asyncness.is_some(),
            has_receiver: function.sig.receiver().is_some(),
        }
    }
}

fn locate_module(parent: &ModuleFile, name: &str, attributes: &[Attribute]) -> Option<ModuleFile> {
    if let Some(path) = path_attribute(attributes) {
        // inside inline modules, paths are relative to the directory of the inline module
        let file = if parent.inline {
            parent.children.join(&path)
        } else {
            parent
                .file
                .parent()
                .map(|directory| directory.join(&path))
                .unwrap_or_else(|| PathBuf::from(&path))
        };
        let children = match (file.file_name(), file.parent(), file.file_stem()) {
            (Some(file_name), Some(directory), _) if file_name == MOD_RS => directory.to_path_buf(),
            (_, Some(directory), Some(stem)) => directory.join(stem),
            _ => PathBuf::new(),
        };

        return file.is_file().then_some(ModuleFile {
            file,
            children,
            inline: false,
        });
    }

    let children = parent.children.join(name);
    let file = parent.children.join(format!("{name}.rs"));
    if file.is_file() {
        return Some(ModuleFile {
            file,
            children,
            inline: false,
        });
    }

    let file = children.join(MOD_RS);
    file.is_file().then_some(ModuleFile {
        file,
        children,
        inline: false,
    })
}

impl ProgramModel for SourceProgram {
    fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    fn namespace_of(&self, declaration: &TypeDeclaration) -> Option<String> {
        self.type_paths
            .get(declaration.id.0)
            .map(|path| path.parent().render(self.library_name.as_deref()))
    }

    fn entry_point(&self) -> Option<EntryPoint> {
        self.entry_point.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::ProgramModel;
    use crate::source::{SourceLayout, SourceProgram};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, file: &str, content: &str) {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn load(root: &Path) -> SourceProgram {
        SourceProgram::load(&SourceLayout::new(root, Some("todo-app"))).unwrap()
    }

    #[test]
    fn should_find_entry_point() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/main.rs", "fn main() {}\n");

        let program = load(root.path());
        let entry_point = program.entry_point().unwrap();
        assert_eq!(entry_point.name, "main");
        assert_eq!(entry_point.namespace, "crate");
    }

    #[test]
    fn should_not_find_missing_entry_point() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/main.rs", "fn start() {}\n");

        assert!(load(root.path()).entry_point().is_none());

        let root = TempDir::new().unwrap();
        assert!(load(root.path()).entry_point().is_none());
    }

    #[test]
    fn should_walk_module_tree_in_order() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "src/main.rs",
            "mod services;\nmod inline { pub struct Inline; impl Inline { fn a(&self) {} } }\nfn main() {}\n",
        );
        write(root.path(), "src/services/mod.rs", "mod todo;\nmod blog;\n");
        write(
            root.path(),
            "src/services/todo.rs",
            "pub struct TodoService;\n#[group(\"todo\")]\nimpl TodoService {}\n",
        );
        write(
            root.path(),
            "src/services/blog.rs",
            "pub struct BlogService;\nimpl BlogService {}\n",
        );

        let program = load(root.path());
        let names: Vec<_> = program.types().iter().map(|ty| ty.name.as_str()).collect();
        assert_eq!(names, ["TodoService", "BlogService", "Inline"]);

        let namespaces: Vec<_> = program
            .types()
            .iter()
            .map(|ty| program.namespace_of(ty).unwrap())
            .collect();
        assert_eq!(
            namespaces,
            ["crate::services::todo", "crate::services::blog", "crate::inline"]
        );
        assert_eq!(program.files().len(), 4);
    }

    #[test]
    fn should_capture_annotations_and_methods() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "src/main.rs",
            r#"
use axum::extract::Path;
use axum::Json as JsonBody;

pub struct Todo;

pub struct TodoService;

#[group("todo")]
impl TodoService {
    #[get("/")]
    pub fn get_all(&self) -> JsonBody<Vec<Todo>> {
        todo!()
    }

    #[aot_routes::get("/{id}")]
    pub async fn get_by_id(&self, mut id: Path<i32>, JsonBody(body): JsonBody<Todo>) {}

    fn create() -> Self {
        Self
    }
}

fn main() {}
"#,
        );

        let program = load(root.path());
        let ty = &program.types()[0];
        assert_eq!(ty.annotations[0].name, "group");
        assert_eq!(ty.annotations[0].arguments, "\"todo\"");
        assert_eq!(ty.methods.len(), 3);

        let get_all = &ty.methods[0];
        assert_eq!(get_all.annotations[0].arguments, "\"/\"");
        assert!(get_all.parameters.is_empty());
        assert!(get_all.has_receiver);
        assert!(!get_all.is_async);

        let get_by_id = &ty.methods[1];
        assert_eq!(get_by_id.annotations[0].name, "aot_routes::get");
        assert!(get_by_id.is_async);
        assert_eq!(get_by_id.parameters[0].name, "id");
        assert_eq!(
            get_by_id.parameters[0].ty.replace(' ', ""),
            "::axum::extract::Path<i32>"
        );
        assert_eq!(get_by_id.parameters[1].name, "arg1");
        assert_eq!(
            get_by_id.parameters[1].ty.replace(' ', ""),
            "::axum::Json<crate::Todo>"
        );

        assert!(!ty.methods[2].has_receiver);
    }

    #[test]
    fn should_reference_library_items_by_crate_name() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/lib.rs", "pub mod handlers;\n");
        write(
            root.path(),
            "src/handlers.rs",
            "use crate::handlers::model::Item;\npub mod model { pub struct Item; }\npub struct Items;\n#[group(\"items\")]\nimpl Items { #[post(\"/\")] fn add(&self, item: Item) {} }\n",
        );
        write(root.path(), "src/main.rs", "fn main() {}\n");

        let program = load(root.path());
        let ty = &program.types()[0];
        assert_eq!(
            program.namespace_of(ty),
            Some("::todo_app::handlers".to_string())
        );
        assert_eq!(
            ty.methods[0].parameters[0].ty.replace(' ', ""),
            "::todo_app::handlers::model::Item"
        );
    }

    #[test]
    fn should_resolve_relative_paths() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "src/main.rs",
            "mod api;\npub struct Shared;\nfn main() {}\n",
        );
        write(
            root.path(),
            "src/api.rs",
            "use super::Shared;\nuse self::inner::Local as Renamed;\nmod inner { pub struct Local; }\npub struct Api;\nimpl Api { fn call(&self, a: Shared, b: Renamed, c: String, d: Option<super::Shared>) {} }\n",
        );

        let program = load(root.path());
        let parameters: Vec<_> = program.types()[0].methods[0]
            .parameters
            .iter()
            .map(|parameter| parameter.ty.replace(' ', ""))
            .collect();
        assert_eq!(
            parameters,
            [
                "crate::Shared",
                "crate::api::inner::Local",
                "String",
                "Option<crate::Shared>"
            ]
        );
    }

    #[test]
    fn should_follow_path_attributes() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "src/main.rs",
            "#[path = \"routes/handlers.rs\"]\nmod handlers;\nfn main() {}\n",
        );
        write(
            root.path(),
            "src/routes/handlers.rs",
            "pub struct Routes;\nimpl Routes {}\n",
        );

        let program = load(root.path());
        assert_eq!(program.types()[0].name, "Routes");
        assert_eq!(
            program.namespace_of(&program.types()[0]),
            Some("crate::handlers".to_string())
        );
    }

    #[test]
    fn should_skip_missing_modules() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/main.rs", "mod missing;\nfn main() {}\n");

        let program = load(root.path());
        assert!(program.types().is_empty());
        assert!(program.entry_point().is_some());
    }

    #[test]
    fn should_report_parse_errors() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/main.rs", "fn main( {}\n");

        assert!(SourceProgram::load(&SourceLayout::new(root.path(), None)).is_err());
    }

    #[test]
    fn should_replace_self_with_handler_type() {
        let root = TempDir::new().unwrap();
        write(root.path(), "src/main.rs", "mod api;\nfn main() {}\n");
        write(
            root.path(),
            "src/api.rs",
            "use axum::Json;\npub struct Api;\nimpl Api { fn update(&self, a: Json<Self>, b: Self, c: Option<Vec<Self>>) {} }\n",
        );

        let program = load(root.path());
        let parameters: Vec<_> = program.types()[0].methods[0]
            .parameters
            .iter()
            .map(|parameter| parameter.ty.replace(' ', ""))
            .collect();
        assert_eq!(
            parameters,
            [
                "::axum::Json<crate::api::Api>",
                "crate::api::Api",
                "Option<Vec<crate::api::Api>>"
            ]
        );
    }

    #[test]
    fn should_follow_path_attributes_in_inline_modules() {
        let root = TempDir::new().unwrap();
        write(
            root.path(),
            "src/main.rs",
            "mod outer {\n    #[path = \"nested.rs\"]\n    mod inner;\n}\nfn main() {}\n",
        );
        write(
            root.path(),
            "src/outer/nested.rs",
            "pub struct Nested;\nimpl Nested {}\n",
        );
        write(root.path(), "src/nested.rs", "pub struct Wrong;\nimpl Wrong {}\n");

        let program = load(root.path());
        assert_eq!(program.types().len(), 1);
        assert_eq!(program.types()[0].name, "Nested");
        assert_eq!(
            program.namespace_of(&program.types()[0]),
            Some("crate::outer::inner".to_string())
        );
    }
}
