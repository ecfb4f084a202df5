use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr};
use tracing::info;

use crate::entity::{blog, comment};

/// Ensure required database indexes exist.
///
/// Schema sync creates the foreign keys but not indexes on them, so the
/// owner and comment lookups get theirs here on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // SELECT ... FROM blog WHERE user_id IN (...)
    let blog_user = Index::create()
        .if_not_exists()
        .name("idx_blog_user")
        .table(blog::Entity)
        .col(blog::Column::UserId)
        .to_owned();

    // SELECT ... FROM comment WHERE blog_id IN (...) ORDER BY id
    let comment_blog = Index::create()
        .if_not_exists()
        .name("idx_comment_blog")
        .table(comment::Entity)
        .col(comment::Column::BlogId)
        .to_owned();

    for stmt in [blog_user, comment_blog] {
        let sql = index_sql(db.get_database_backend(), &stmt);
        match db.execute_unprepared(&sql).await {
            Ok(_) => info!("Ensured index: {}", sql),
            Err(e) => tracing::warn!("Failed to create index ({}): {}", sql, e),
        }
    }

    Ok(())
}

fn index_sql(backend: DbBackend, stmt: &IndexCreateStatement) -> String {
    // Only the Postgres and SQLite drivers are compiled in.
    if backend == DbBackend::Postgres {
        stmt.to_string(PostgresQueryBuilder)
    } else {
        stmt.to_string(SqliteQueryBuilder)
    }
}
