use crate::analyzer::ModuleGraph;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// 没有依赖的模块
const LEAF_COLOR: &str = "lightgrey";
/// 有依赖的模块
const DEPENDENT_COLOR: &str = "lightblue";

/// 按出度划分的显示分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    /// 出度 0 或 1
    Basic,
    /// 出度大于 2
    Advanced,
}

impl Cluster {
    /// 出度恰好为 2 的模块不属于任何分组
    pub fn for_out_degree(degree: usize) -> Option<Self> {
        match degree {
            0 | 1 => Some(Self::Basic),
            2 => None,
            _ => Some(Self::Advanced),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Basic => "cluster_basic",
            Self::Advanced => "cluster_advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            Self::Basic => "darkgreen",
            Self::Advanced => "firebrick",
        }
    }
}

/// Graphviz DOT 生成器
pub struct DotGenerator {
    title: Option<String>,
    rankdir: String,
}

impl DotGenerator {
    pub fn new() -> Self {
        Self {
            title: None,
            rankdir: "LR".to_string(),
        }
    }

    /// 图标题, 一般是归档名
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_rankdir(mut self, rankdir: &str) -> Self {
        self.rankdir = rankdir.to_string();
        self
    }

    /// 生成模块依赖图
    pub fn generate(&self, graph: &ModuleGraph) -> String {
        let mut lines = vec!["digraph Modules {".to_string()];

        lines.push(format!("  rankdir={};", self.rankdir));
        if let Some(title) = &self.title {
            lines.push(format!("  label=\"{}\";", escape(title)));
            lines.push("  labelloc=t;".to_string());
        }
        lines.push("  fontname=\"Arial\";".to_string());
        lines.push(
            "  node [shape=box, style=\"rounded,filled\", fontname=\"Arial\", fontsize=12];"
                .to_string(),
        );
        lines.push("  edge [color=gray40, arrowsize=0.7];".to_string());

        // 节点 (ModuleGraph 已按名字排序)
        if !graph.is_empty() {
            lines.push(String::new());
        }
        for module in graph.modules() {
            let color = if graph.out_degree(module) == 0 {
                LEAF_COLOR
            } else {
                DEPENDENT_COLOR
            };
            lines.push(format!("  {} [fillcolor={}];", Self::node_id(module), color));
        }

        // 边, 只保留指向图中模块的
        let mut edges = Vec::new();
        for (from, deps) in graph.iter() {
            for to in deps.iter().filter(|to| graph.contains(to)) {
                edges.push(format!("  {} -> {};", Self::node_id(from), Self::node_id(to)));
            }
        }
        if !edges.is_empty() {
            lines.push(String::new());
            lines.extend(edges);
        }

        for cluster in [Cluster::Basic, Cluster::Advanced] {
            let members = Self::members(graph, cluster);
            if members.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("  subgraph {} {{", cluster.id()));
            lines.push(format!("    label=\"{}\";", cluster.label()));
            lines.push("    style=dashed;".to_string());
            lines.push(format!("    color={};", cluster.color()));
            for module in members {
                lines.push(format!("    {};", Self::node_id(module)));
            }
            lines.push("  }".to_string());
        }

        lines.push("}".to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// 生成并写入文件 (覆盖)
    pub fn emit(&self, graph: &ModuleGraph, destination: &Path) -> Result<String> {
        let dot = self.generate(graph);
        std::fs::write(destination, &dot)?;
        tracing::info!("DOT written: {}", destination.display());
        Ok(dot)
    }

    /// 属于某分组的模块, 按名字排序
    pub fn members(graph: &ModuleGraph, cluster: Cluster) -> Vec<&str> {
        graph
            .modules()
            .filter(|m| Cluster::for_out_degree(graph.out_degree(m)) == Some(cluster))
            .collect()
    }

    #[doc(hidden)]
    pub fn node_id(name: &str) -> String {
        format!("\"{}\"", escape(name))
    }
}

impl Default for DotGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 转义 DOT 字符串中的特殊字符
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
