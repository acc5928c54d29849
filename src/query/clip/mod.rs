pub use self::clip_aabb_line::clip_aabb_line;
pub use self::clip_ray::{clip_ray, clip_rays};

mod clip_aabb_line;
mod clip_ray;
