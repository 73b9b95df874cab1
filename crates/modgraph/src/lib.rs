//! modgraph - 模块依赖图
//!
//! 按包名归类、启发式估计依赖、生成 Graphviz DOT

mod analyzer;
mod dot;
mod heuristic;
mod manifest_dot;
mod namer;
mod render;

pub use analyzer::{Classification, ModuleAnalyzer, ModuleGraph};
pub use dot::{escape, Cluster, DotGenerator, GraphError, Result};
pub use heuristic::{estimate_module, extra_dependencies, EXCEPTION_MODULE, LAYERING, UTILITY_MODULE};
pub use manifest_dot::ManifestDiagram;
pub use namer::{class_identifier, ModuleNamer, DEFAULT_ROOT_NAMESPACE};
pub use render::{RenderOutcome, Renderer};
