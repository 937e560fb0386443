/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to initialize WebGL context or retrieve DOM elements.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Shader compilation failure, carrying the driver's info log.
    #[error("Shader compile error: {0}")]
    Compile(String),

    /// Program link failure, carrying the driver's info log.
    #[error("Shader link error: {0}")]
    Link(String),

    /// WebGL resource creation or lookup errors.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Malformed record in a mesh source.
    #[error("Mesh format error: {0}")]
    Format(String),

    /// Face record referencing a table slot that has not been declared.
    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    /// Matrix with a zero or near-zero determinant.
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Math operation evaluated outside its domain.
    #[error("Domain error: {0}")]
    Domain(String),
}

impl Error {
    // Helper constructors for common error scenarios

    // Initialization errors
    pub fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    pub fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    pub fn canvas_not_found() -> Self {
        Self::Initialization("Unable to retrieve canvas".to_string())
    }

    pub fn webgl_context_failed() -> Self {
        Self::Initialization("Failed to retrieve WebGL2 rendering context".to_string())
    }

    // Shader errors
    pub fn shader_creation_failed(stage: &str) -> Self {
        Self::Resource(format!("Failed to create {stage} shader"))
    }

    pub fn shader_program_creation_failed() -> Self {
        Self::Resource("Shader program creation failed".to_string())
    }

    pub fn compile_failed(stage: &str, log: String) -> Self {
        Self::Compile(format!("{stage} shader: {log}"))
    }

    pub fn link_failed(log: String) -> Self {
        Self::Link(log)
    }

    // Resource errors
    pub fn buffer_creation_failed(buffer_type: &str) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer"))
    }

    pub fn vertex_array_creation_failed() -> Self {
        Self::Resource("Failed to create vertex array object".to_string())
    }

    pub fn texture_creation_failed() -> Self {
        Self::Resource("Failed to create texture".to_string())
    }

    pub fn uniform_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get uniform location: {name}"))
    }

    pub fn element_creation_failed(element_type: &str) -> Self {
        Self::Resource(format!("Failed to create element: {element_type}"))
    }

    pub fn unknown_texture(id: u32) -> Self {
        Self::Resource(format!("No texture registered for handle {id}"))
    }

    pub fn too_many_lights(count: usize, max: usize) -> Self {
        Self::Resource(format!("{count} light sources exceed the shader limit of {max}"))
    }

    // Mesh errors
    pub fn malformed_record(line: usize, detail: &str) -> Self {
        Self::Format(format!("line {line}: {detail}"))
    }

    pub fn face_vertex_count(line: usize, count: usize) -> Self {
        Self::Format(format!("line {line}: face with {count} vertices, expected 3"))
    }

    pub fn dangling_index(line: usize, kind: &str, index: usize, declared: usize) -> Self {
        Self::IndexOutOfRange(format!(
            "line {line}: {kind} index {index}, but only {declared} declared"
        ))
    }

    // Math errors
    pub fn unnormalizable(length: f32) -> Self {
        Self::Domain(format!("cannot normalize vector with length {length}"))
    }

    pub fn singular_matrix(determinant: f32) -> Self {
        Self::SingularMatrix(format!("determinant {determinant} below epsilon"))
    }
}
