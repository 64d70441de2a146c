//! One repository per table. Every repository is a zero-sized struct with
//! associated async functions taking `&PgPool`.

pub mod comment_repo;
pub mod member_repo;
pub mod project_repo;
pub mod task_repo;
pub mod task_status_repo;

pub use comment_repo::TaskCommentRepo;
pub use member_repo::MemberRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use task_status_repo::TaskStatusRepo;

/// Escape `LIKE` wildcards in user input and wrap it for a substring match.
pub(crate) fn like_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            format!("%{escaped}%")
        })
}
