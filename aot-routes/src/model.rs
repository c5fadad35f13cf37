//! The program model consumed by the generator: declared types with their methods and attached
//! annotations, a namespace lookup and the program entry point. The model is read-only input and
//! is always fully materialized before a generation pass starts.
//!
//! [SourceProgram](crate::source::SourceProgram) builds a model by parsing a Cargo package, while
//! [InMemoryProgram] can be assembled by hand.

use derive_more::Constructor;

/// Identifies a declared type within the model which created it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclarationId(pub usize);

/// An annotation attached to a declaration.
#[derive(Clone, Eq, PartialEq, Debug, Constructor)]
pub struct Annotation {
    /// Name as written in source, e.g. `get` or `aot_routes::get`.
    pub name: String,
    /// Raw text of the argument list, without the enclosing parentheses. Empty if there are no
    /// arguments.
    pub arguments: String,
}

impl Annotation {
    /// Last segment of the annotation path.
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit("::")
            .next()
            .unwrap_or(&self.name)
            .trim()
    }
}

/// A declared method parameter.
#[derive(Clone, Eq, PartialEq, Debug, Constructor)]
pub struct Parameter {
    pub name: String,
    /// Declared type, qualified as far as the model can resolve it.
    pub ty: String,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MethodDeclaration {
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<Parameter>,
    pub is_async: bool,
    /// Does the method take `self` in any form.
    pub has_receiver: bool,
}

impl MethodDeclaration {
    /// Creates a synchronous method with a `&self` receiver.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
            parameters: Vec::new(),
            is_async: false,
            has_receiver: true,
        }
    }

    pub fn with_annotation(mut self, name: &str, arguments: &str) -> Self {
        self.annotations
            .push(Annotation::new(name.to_string(), arguments.to_string()));
        self
    }

    pub fn with_parameter(mut self, name: &str, ty: &str) -> Self {
        self.parameters
            .push(Parameter::new(name.to_string(), ty.to_string()));
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn without_receiver(mut self) -> Self {
        self.has_receiver = false;
        self
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeDeclaration {
    pub id: DeclarationId,
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub methods: Vec<MethodDeclaration>,
}

/// The entry point of a program.
#[derive(Clone, Eq, PartialEq, Debug, Constructor)]
pub struct EntryPoint {
    pub name: String,
    /// Namespace containing the entry point. Generated sources are anchored in it.
    pub namespace: String,
}

/// Read-only view of a program, as seen by the generator.
pub trait ProgramModel {
    /// All declared types, in stable declaration order.
    fn types(&self) -> &[TypeDeclaration];

    /// Fully qualified namespace of the given declaration, e.g. `crate::services`. Returns [None]
    /// if the namespace cannot be resolved.
    fn namespace_of(&self, declaration: &TypeDeclaration) -> Option<String>;

    /// Program entry point, if any.
    fn entry_point(&self) -> Option<EntryPoint>;
}

/// A [ProgramModel] assembled by hand.
#[derive(Clone, Default, Debug)]
pub struct InMemoryProgram {
    types: Vec<TypeDeclaration>,
    namespaces: Vec<Option<String>>,
    entry_point: Option<EntryPoint>,
}

impl InMemoryProgram {
    pub fn new(entry_point: Option<EntryPoint>) -> Self {
        Self {
            entry_point,
            ..Default::default()
        }
    }

    /// Adds a type declared in the given namespace and returns a builder for its content.
    pub fn declare_type(&mut self, namespace: Option<&str>, name: &str) -> TypeBuilder<'_> {
        let id = DeclarationId(self.types.len());
        self.types.push(TypeDeclaration {
            id,
            name: name.to_string(),
            annotations: Vec::new(),
            methods: Vec::new(),
        });
        self.namespaces.push(namespace.map(str::to_string));

        TypeBuilder {
            declaration: &mut self.types[id.0],
        }
    }
}

impl ProgramModel for InMemoryProgram {
    fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    fn namespace_of(&self, declaration: &TypeDeclaration) -> Option<String> {
        self.namespaces.get(declaration.id.0).cloned().flatten()
    }

    fn entry_point(&self) -> Option<EntryPoint> {
        self.entry_point.clone()
    }
}

/// Fills a type declared in an [InMemoryProgram].
pub struct TypeBuilder<'a> {
    declaration: &'a mut TypeDeclaration,
}

impl TypeBuilder<'_> {
    pub fn with_annotation(self, name: &str, arguments: &str) -> Self {
        self.declaration
            .annotations
            .push(Annotation::new(name.to_string(), arguments.to_string()));
        self
    }

    pub fn with_method(self, method: MethodDeclaration) -> Self {
        self.declaration.methods.push(method);
        self
    }
}
