pub mod request;
pub mod response;
pub mod style;
pub mod tensor;

pub use request::*;
pub use response::*;
pub use style::*;
pub use tensor::*;
