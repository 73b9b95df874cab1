use archive::CLASS_SUFFIX;

/// 默认根命名空间 (Apache Commons Math 3)
pub const DEFAULT_ROOT_NAMESPACE: &str = "org.apache.commons.math3";

/// 根命名空间的段数, 模块名取紧随其后的一段
const ROOT_SEGMENTS: usize = 4;

/// 类名 -> 模块名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNamer {
    root: String,
}

impl ModuleNamer {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// `org.apache.commons.math3.linear.RealMatrix` -> `linear`
    ///
    /// 少于 5 段或前 4 段与根命名空间不一致时返回 None
    pub fn module_of<'a>(&self, class_id: &'a str) -> Option<&'a str> {
        let parts: Vec<&str> = class_id.split('.').collect();
        if parts.len() <= ROOT_SEGMENTS {
            return None;
        }
        if parts[..ROOT_SEGMENTS].join(".") != self.root {
            return None;
        }
        Some(parts[ROOT_SEGMENTS])
    }
}

impl Default for ModuleNamer {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_NAMESPACE)
    }
}

/// 条目路径 -> 类名, 只接受顶层类 (跳过内部类/合成类)
pub fn class_identifier(path: &str) -> Option<String> {
    let stem = path.strip_suffix(CLASS_SUFFIX)?;
    if path.contains('$') {
        return None;
    }
    Some(stem.replace('/', "."))
}
