//! MANIFEST.MF 概览图
//!
//! 一个主节点加上信息、导出包、私有包、版本/许可证几个汇总节点

use crate::dot::escape;
use archive::Manifest;

/// 信息节点展示的属性
const IMPORTANT_KEYS: &[&str] = &[
    "Manifest-Version",
    "Implementation-Title",
    "Built-By",
    "Implementation-Vendor",
    "Specification-Title",
    "Bundle-Name",
    "Created-By",
    "Build-Jdk",
    "Bundle-SymbolicName",
    "Bundle-Description",
];

const MAX_INFO_ITEMS: usize = 8;
const MAX_VERSION_ITEMS: usize = 5;

/// Manifest 图生成器
pub struct ManifestDiagram {
    max_exports: usize,
}

impl ManifestDiagram {
    pub fn new() -> Self {
        Self { max_exports: 15 }
    }

    pub fn with_max_exports(mut self, max: usize) -> Self {
        self.max_exports = max;
        self
    }

    /// 生成 DOT, `name` 是归档名
    pub fn generate(&self, manifest: &Manifest, name: &str) -> String {
        let mut lines = vec![
            "digraph Manifest {".to_string(),
            "  rankdir=TB;".to_string(),
            "  size=\"11,8.5\";".to_string(),
            "  ratio=fill;".to_string(),
            "  dpi=150;".to_string(),
            "  ranksep=0.5;".to_string(),
            "  nodesep=0.3;".to_string(),
            "  node [shape=box, style=rounded, fontname=\"Arial\", fontsize=14];".to_string(),
            "  edge [fontsize=12];".to_string(),
            String::new(),
        ];

        let bundle = manifest.get("Bundle-Name").unwrap_or(name);
        let version = manifest.get("Bundle-Version").unwrap_or("");
        lines.push(format!(
            "  main [label=\"{}\\n{}\\nVersion: {}\", shape=ellipse, style=filled, fillcolor=lightblue, fontsize=16, width=3, height=1.5];",
            escape(bundle),
            escape(name),
            escape(version)
        ));
        lines.push(String::new());

        // 基本信息
        let info = labelled_list(
            "MANIFEST INFO",
            manifest
                .iter()
                .filter(|(k, _)| IMPORTANT_KEYS.contains(k))
                .take(MAX_INFO_ITEMS)
                .map(|(k, v)| format!("{}: {}", shorten(k, 25), shorten(v, 20))),
        );
        lines.push(format!(
            "  info [label=\"{}\", fillcolor=lightyellow, style=filled, fontsize=12, width=3, height=2];",
            info
        ));
        lines.push("  main -> info [color=blue];".to_string());
        lines.push(String::new());

        let exports = split_packages(attribute_containing(manifest, "Export-Package"));
        if !exports.is_empty() {
            let mut items: Vec<String> = exports
                .iter()
                .take(self.max_exports)
                .map(|p| format!("• {}", short_package_name(p)))
                .collect();
            if exports.len() > self.max_exports {
                items.push(format!("• ... and {} more", exports.len() - self.max_exports));
            }
            let label = labelled_list(
                &format!("EXPORT PACKAGES\\n({} packages)", exports.len()),
                items.into_iter(),
            );
            lines.push(format!(
                "  export [label=\"{}\", fillcolor=lightgreen, style=filled, fontsize=12, width=3.5, height=3];",
                label
            ));
            lines.push("  main -> export [color=green];".to_string());
            lines.push(String::new());
        }

        let private = split_packages(attribute_containing(manifest, "Private-Package"));
        if !private.is_empty() {
            let label = labelled_list(
                &format!("PRIVATE PACKAGES\\n({} packages)", private.len()),
                private.iter().map(|p| format!("• {}", short_package_name(p))),
            );
            lines.push(format!(
                "  private [label=\"{}\", fillcolor=lightcoral, style=filled, fontsize=12, width=3, height=1.5];",
                label
            ));
            lines.push("  main -> private [color=red];".to_string());
            lines.push(String::new());
        }

        let versions = labelled_list(
            "VERSION & LICENSE",
            manifest
                .iter()
                .filter(|(k, _)| {
                    let key = k.to_lowercase();
                    key.contains("version") || key.contains("license")
                })
                .take(MAX_VERSION_ITEMS)
                .map(|(k, v)| format!("{}: {}", shorten(k, 20), shorten(v, 25))),
        );
        lines.push(format!(
            "  version [label=\"{}\", fillcolor=orange, style=filled, fontsize=12, width=3, height=2];",
            versions
        ));
        lines.push("  main -> version [color=orange];".to_string());

        lines.push("}".to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Default for ManifestDiagram {
    fn default() -> Self {
        Self::new()
    }
}

/// 名称包含 `needle` 的属性值, 有多个时取最后一个
fn attribute_containing<'a>(manifest: &'a Manifest, needle: &str) -> &'a str {
    manifest
        .iter()
        .filter(|(k, _)| k.contains(needle))
        .last()
        .map(|(_, v)| v)
        .unwrap_or("")
}

/// 标题 + 分隔线 + 条目, 用 DOT 的 `\n` 连接, 条目会被转义
fn labelled_list(title: &str, items: impl Iterator<Item = String>) -> String {
    let mut label = format!("{}\\n─────────────────\\n", title);
    for item in items {
        label.push_str(&escape(&item));
        label.push_str("\\n");
    }
    label
}

/// 按引号外的逗号切分包列表, 去掉 `;` 之后的属性
#[doc(hidden)]
pub fn split_packages(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in value.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);

    parts
        .iter()
        .map(|p| p.split(';').next().unwrap_or("").trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// 缩短包名用于显示
#[doc(hidden)]
pub fn short_package_name(full: &str) -> String {
    let parts: Vec<&str> = full.split('.').collect();
    if parts.len() > 4 {
        parts[parts.len() - 2..].join(".")
    } else if parts.len() > 2 {
        parts[parts.len() - 1].to_string()
    } else if full.chars().count() > 20 {
        format!("{}...", full.chars().take(17).collect::<String>())
    } else {
        full.to_string()
    }
}

/// 超过 `max` 个字符时截断并加省略号
#[doc(hidden)]
pub fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
