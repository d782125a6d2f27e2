pub mod draw_range;
pub mod mesh;
pub mod morphospace;
pub mod scene;

pub use draw_range::{DrawRange, construction_curve_slices, range_for};
pub use mesh::{MeshLayout, MeshVariant, ShellMesh, ShellVertex, ThetaDomain, generate};
pub use morphospace::{MorphTunables, MorphospaceConstants, ReferenceCurve};
pub use scene::{PassParams, RenderPass, SceneConfig, SceneLayer, compose};
