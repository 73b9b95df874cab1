use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 渲染结果, 失败只用于提示, 不影响已写入的 DOT 文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(PathBuf),
    ToolUnavailable,
    Failed(String),
}

/// 调用外部 Graphviz 渲染图片
#[derive(Debug, Clone)]
pub struct Renderer {
    tool: String,
    format: String,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            tool: "dot".to_string(),
            format: "png".to_string(),
        }
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tool = tool.to_string();
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// `<tool> -V` 能否启动
    pub fn is_available(&self) -> bool {
        Command::new(&self.tool)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// 与描述文件同名、扩展名为输出格式的图片路径
    ///
    /// 扩展名与格式相同 (如 `-Tdot`) 时改为 `<stem>.rendered.<format>`, 不覆盖描述文件
    pub fn image_path_for(&self, description: &Path) -> PathBuf {
        let image = description.with_extension(&self.format);
        if image != description {
            return image;
        }
        description.with_extension(format!("rendered.{}", self.format))
    }

    /// 先检查工具, 再渲染到 [`Self::image_path_for`]
    pub fn render_file(&self, description: &Path) -> RenderOutcome {
        if !self.is_available() {
            return RenderOutcome::ToolUnavailable;
        }
        self.render(description, &self.image_path_for(description))
    }

    /// `<tool> -T<format> <description> -o <image>`, 同步执行, 无超时
    pub fn render(&self, description: &Path, image: &Path) -> RenderOutcome {
        tracing::debug!(
            "Running {} -T{} {} -o {}",
            self.tool,
            self.format,
            description.display(),
            image.display()
        );

        let status = Command::new(&self.tool)
            .arg(format!("-T{}", self.format))
            .arg(description)
            .arg("-o")
            .arg(image)
            .status();

        match status {
            Ok(s) if s.success() => RenderOutcome::Rendered(image.to_path_buf()),
            Ok(s) => RenderOutcome::Failed(format!("{} exited with {}", self.tool, s)),
            Err(e) if e.kind() == ErrorKind::NotFound => RenderOutcome::ToolUnavailable,
            Err(e) => RenderOutcome::Failed(e.to_string()),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
