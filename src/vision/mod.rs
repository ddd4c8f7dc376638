pub mod normalize;

pub use normalize::{normalize_image, ImageTensor};
