use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "todo" => Some(Self::Todo),
            "in_progress" | "doing" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    pub fn all() -> &'static [TaskStatus] {
        &[Self::Todo, Self::InProgress, Self::Done, Self::Blocked]
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit of work under a project, listed by `sort_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: Option<i64>,
    pub project_id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub sort_order: i64,
    pub created_at: String,
}

impl Task {
    pub fn new(project_id: i64, title: String) -> Self {
        Self {
            id: None,
            project_id,
            title: title.trim().to_string(),
            status: TaskStatus::Todo,
            sort_order: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtask {
    pub id: Option<i64>,
    pub task_id: i64,
    pub title: String,
    pub status: TaskStatus,
    pub sort_order: i64,
    pub created_at: String,
}

impl Subtask {
    pub fn new(task_id: i64, title: String) -> Self {
        Self {
            id: None,
            task_id,
            title: title.trim().to_string(),
            status: TaskStatus::Todo,
            sort_order: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
