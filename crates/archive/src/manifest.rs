use serde::ser::{Serialize, SerializeMap, Serializer};

/// MANIFEST.MF 主段属性, 保持文件中的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    /// 解析主段
    ///
    /// - `Name: value` 一行一个属性
    /// - 以单个空格开头的行是上一个值的续行
    /// - 第一个空行结束主段
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::default();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if let Some(rest) = line.strip_prefix(' ') {
                if let Some((_, value)) = manifest.attributes.last_mut() {
                    value.push_str(rest);
                }
                continue;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    let value = value.strip_prefix(' ').unwrap_or(value);
                    manifest.insert(name.trim(), value);
                }
                None => tracing::debug!("Skipping malformed manifest line: {}", line),
            }
        }

        manifest
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut manifest = Self::default();
        for (k, v) in pairs {
            manifest.insert(&k.into(), &v.into());
        }
        manifest
    }

    /// 插入属性, 同名 (不区分大小写) 则覆盖原值
    fn insert(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// 按名字查找, 不区分大小写
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// 对齐的 `key : value` 表格, 末尾附属性总数
    pub fn to_table(&self) -> String {
        let width = self
            .attributes
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(10)
            + 2;

        let mut out = String::new();
        for (k, v) in &self.attributes {
            out.push_str(&format!("{:<width$} : {}\n", k, v, width = width));
        }
        out.push_str(&format!("=== Total attributes: {} ===\n", self.attributes.len()));
        out
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (k, v) in &self.attributes {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Manifest-Version: 1.0\r\n\
Bundle-Name: Apache Commons Math\r\n\
Export-Package: org.apache.commons.math3.linear;version=\"3.6.1\",org.ap\r\n \
ache.commons.math3.stat;version=\"3.6.1\"\r\n\
Created-By: Apache Maven\r\n\
\r\n\
Name: org/apache/commons/math3/\r\n\
Sealed: true\r\n";

    #[test]
    fn test_parse_keeps_file_order() {
        let manifest = Manifest::parse(SAMPLE);
        let keys: Vec<_> = manifest.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["Manifest-Version", "Bundle-Name", "Export-Package", "Created-By"]
        );
    }

    #[test]
    fn test_parse_joins_continuation_lines() {
        let manifest = Manifest::parse(SAMPLE);
        assert_eq!(
            manifest.get("Export-Package"),
            Some("org.apache.commons.math3.linear;version=\"3.6.1\",org.apache.commons.math3.stat;version=\"3.6.1\"")
        );
    }

    #[test]
    fn test_parse_stops_at_main_section_end() {
        let manifest = Manifest::parse(SAMPLE);
        assert!(manifest.get("Sealed").is_none());
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let manifest = Manifest::parse("Bundle-Version: 3.6.1\n");
        assert_eq!(manifest.get("bundle-version"), Some("3.6.1"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(Manifest::parse("").is_empty());
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let manifest = Manifest::parse("A: 1\nB: 2\nA: 3\n");
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("A"), Some("3"));
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let manifest = Manifest::parse("Bundle-DocURL: http://commons.apache.org/math/\n");
        assert_eq!(manifest.get("Bundle-DocURL"), Some("http://commons.apache.org/math/"));
    }

    #[test]
    fn test_to_table_aligns_keys() {
        let manifest = Manifest::from_pairs([("A", "1"), ("Long-Key", "2")]);
        let table = manifest.to_table();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "A          : 1");
        assert_eq!(lines[1], "Long-Key   : 2");
        assert_eq!(lines[2], "=== Total attributes: 2 ===");
    }

    #[test]
    fn test_serialize_as_map() {
        let manifest = Manifest::from_pairs([("B", "2"), ("A", "1")]);
        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }
}
