//! 启发式依赖估计
//!
//! 只看类所在的模块查表, 不分析字节码

use std::collections::BTreeSet;

/// 所有模块都默认依赖的工具模块
pub const UTILITY_MODULE: &str = "util";
/// 所有模块都默认依赖的异常模块
pub const EXCEPTION_MODULE: &str = "exception";

/// 已知分层: 模块 -> 额外依赖
pub const LAYERING: &[(&str, &[&str])] = &[
    ("linear", &["util"]),
    ("stat", &["distribution", "linear", "util"]),
    ("optim", &["linear", "analysis", "util"]),
    ("ml", &["stat", "linear", "optim", "util"]),
    ("genetics", &["optim", "util"]),
    ("transform", &["linear", "util"]),
];

/// 查表得到模块的额外依赖, 不在表中返回空
pub fn extra_dependencies(module: &str) -> &'static [&'static str] {
    LAYERING
        .iter()
        .find(|(name, _)| *name == module)
        .map(|(_, deps)| *deps)
        .unwrap_or(&[])
}

/// 估计模块依赖的模块集合, 结果不含模块自身
pub fn estimate_module(module: &str) -> BTreeSet<String> {
    [UTILITY_MODULE, EXCEPTION_MODULE]
        .iter()
        .chain(extra_dependencies(module))
        .filter(|dep| **dep != module)
        .map(|dep| dep.to_string())
        .collect()
}
