use crate::heuristic;
use crate::namer::{class_identifier, ModuleNamer};
use archive::Archive;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 分类结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// 归档中出现的所有模块
    pub modules: BTreeSet<String>,
    /// 类名 -> 模块名
    pub classes: BTreeMap<String, String>,
}

/// 模块依赖图: 模块 -> 依赖的模块集合
///
/// 依赖目标不一定是图中的模块, 输出时再过滤
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记模块 (可以没有依赖)
    pub fn add_module(&mut self, module: &str) {
        self.edges.entry(module.to_string()).or_default();
    }

    /// 添加依赖边, 自环直接丢弃
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let deps = self.edges.entry(from.to_string()).or_default();
        if from != to {
            deps.insert(to.to_string());
        }
    }

    /// 按名字排序的模块
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn dependencies(&self, module: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.edges.contains_key(module)
    }

    /// 出度, 包含指向图外模块的边
    pub fn out_degree(&self, module: &str) -> usize {
        self.edges.get(module).map_or(0, BTreeSet::len)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// 模块分析器
pub struct ModuleAnalyzer {
    namer: ModuleNamer,
}

impl ModuleAnalyzer {
    pub fn new() -> Self {
        Self {
            namer: ModuleNamer::default(),
        }
    }

    pub fn with_root_namespace(mut self, root: &str) -> Self {
        self.namer = ModuleNamer::new(root);
        self
    }

    pub fn namer(&self) -> &ModuleNamer {
        &self.namer
    }

    /// 一次遍历所有条目, 收集顶层类及其模块
    pub fn classify(&self, archive: &Archive) -> Classification {
        let mut result = Classification::default();

        for entry in archive.entries() {
            let Some(class_id) = class_identifier(&entry.path) else {
                continue;
            };
            let Some(module) = self.namer.module_of(&class_id).map(str::to_string) else {
                tracing::trace!("Outside root namespace: {}", class_id);
                continue;
            };
            result.modules.insert(module.clone());
            result.classes.insert(class_id, module);
        }

        tracing::debug!(
            "Classified {} classes into {} modules",
            result.classes.len(),
            result.modules.len()
        );
        result
    }

    /// 估计类所在模块的依赖, 不属于任何模块时为空
    pub fn estimate(&self, class_id: &str) -> BTreeSet<String> {
        self.namer
            .module_of(class_id)
            .map(heuristic::estimate_module)
            .unwrap_or_default()
    }

    /// 构建模块依赖图
    pub fn synthesize(&self, archive: &Archive) -> ModuleGraph {
        let classification = self.classify(archive);
        let mut graph = ModuleGraph::new();

        for (class_id, module) in &classification.classes {
            graph.add_module(module);
            for dep in self.estimate(class_id) {
                graph.add_dependency(module, &dep);
            }
        }

        tracing::info!(
            "Module graph: {} modules, {} edges",
            graph.len(),
            graph.edge_count()
        );
        graph
    }
}

impl Default for ModuleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
