// Re-export all model types from submodules.

pub use image::ImageRef;
pub use release::{ContainerUpdate, ControllerResult, ReleaseStatus, ResultSet, Verbosity};
pub use resource::ResourceId;

mod image;
mod release;
mod resource;
