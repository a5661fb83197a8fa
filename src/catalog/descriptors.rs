use serde::Serialize;

/// Glyph shown next to a tool or category.
///
/// Serialized as the kebab-case glyph name understood by the front end's
/// icon set; the server never renders icons itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    #[serde(rename = "code-2")]
    Code2,
    FileJson,
    Clock,
    Binary,
    Fingerprint,
    Regex,
    Link,
    Type,
    AlignLeft,
    ArrowLeftRight,
    KeyRound,
    CaseUpper,
    Image,
    QrCode,
    Palette,
    Minimize,
    Calculator,
    ListTodo,
    Dices,
}

/// Development status of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Developed,
    Planned,
}

impl ToolStatus {
    /// Display label used on the home grid.
    pub fn label(&self) -> &'static str {
        match self {
            ToolStatus::Developed => "已开发",
            ToolStatus::Planned => "待开发",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "developed" => Some(ToolStatus::Developed),
            "planned" => Some(ToolStatus::Planned),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub path: &'static str,
    pub status: ToolStatus,
    /// Overrides the route name derived from `path` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<&'static str>,
}

impl ToolDescriptor {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        icon: Icon,
        path: &'static str,
        status: ToolStatus,
    ) -> Self {
        Self {
            name,
            description,
            icon,
            path,
            status,
            route_name: None,
        }
    }

    pub const fn with_route_name(mut self, route_name: &'static str) -> Self {
        self.route_name = Some(route_name);
        self
    }

    /// Name of the route serving this tool: the override if any, otherwise
    /// the path without its leading slash.
    pub fn route_name(&self) -> &'static str {
        match self.route_name {
            Some(name) => name,
            None => self.path.trim_start_matches('/'),
        }
    }

    pub fn is_developed(&self) -> bool {
        self.status == ToolStatus::Developed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDescriptor {
    pub title: &'static str,
    pub id: &'static str,
    pub icon: Icon,
    pub color: &'static str,
    pub background: &'static str,
    pub tools: &'static [ToolDescriptor],
}
