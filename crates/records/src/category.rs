use serde::{Deserialize, Serialize};

/// Presentation category of a record, looked up from its type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    NovelData,
    Character,
    World,
    Outline,
    EventOutline,
    History,
    Custom,
    /// Any tag not in the table
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::NovelData,
        Category::Character,
        Category::World,
        Category::Outline,
        Category::EventOutline,
        Category::History,
        Category::Custom,
        Category::Other,
    ];

    /// Map a backend type tag to its category
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("小说数据") => Self::NovelData,
            Some("人物设定") => Self::Character,
            Some("世界设定") => Self::World,
            Some("作品大纲") => Self::Outline,
            Some("事件细纲") => Self::EventOutline,
            Some("会话历史") => Self::History,
            Some("自定义") => Self::Custom,
            _ => Self::Other,
        }
    }

    /// Type tag the backend uses for this category
    pub const fn type_tag(self) -> Option<&'static str> {
        match self {
            Self::NovelData => Some("小说数据"),
            Self::Character => Some("人物设定"),
            Self::World => Some("世界设定"),
            Self::Outline => Some("作品大纲"),
            Self::EventOutline => Some("事件细纲"),
            Self::History => Some("会话历史"),
            Self::Custom => Some("自定义"),
            Self::Other => None,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::NovelData => "book",
            Self::Character => "user",
            Self::World => "globe",
            Self::Outline => "list-alt",
            Self::EventOutline => "tasks",
            Self::History => "history",
            Self::Custom => "file-alt",
            Self::Other => "file",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::NovelData => "#4CAF50",
            Self::Character => "#2196F3",
            Self::World => "#FF9800",
            Self::Outline => "#9C27B0",
            Self::EventOutline => "#F44336",
            Self::History => "#607D8B",
            Self::Custom => "#795548",
            Self::Other => "#9E9E9E",
        }
    }
}
