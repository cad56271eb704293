use crate::config::AppConfig;
use crate::domain::{
    activity::entity::activity_log,
    goal::entity::{goal, goal_comment, goal_plan},
    group::entity::member_group,
    member::entity::member,
};
use sea_orm::{
    ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Schema, Statement,
};
use tracing::info;

pub async fn establish_connection(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(&config.database_url).await?;
    info!("Successfully connected to the database.");

    if config.db_schema_update {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의를 기준으로 테이블과 인덱스를 생성합니다. 여러 번 실행해도 안전합니다.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)
    create_table_if_not_exists(db, &schema, member_group::Entity).await?;
    create_table_if_not_exists(db, &schema, member::Entity).await?;
    create_table_if_not_exists(db, &schema, goal::Entity).await?;
    create_table_if_not_exists(db, &schema, goal_plan::Entity).await?;
    create_table_if_not_exists(db, &schema, goal_comment::Entity).await?;
    create_table_if_not_exists(db, &schema, activity_log::Entity).await?;

    create_unique_index_if_not_exists(
        db,
        "uq_member_group_nickname",
        "member",
        &["group_id", "nickname"],
    )
    .await?;
    // CATEGORY 행은 slot_index가 NULL이라 이 인덱스에 걸리지 않는다
    create_unique_index_if_not_exists(
        db,
        "uq_goal_member_slot",
        "goal",
        &["member_id", "goal_type", "category", "slot_index"],
    )
    .await?;
    create_index_if_not_exists(
        db,
        "idx_activity_log_group_created",
        "activity_log",
        &["group_id", "created_at"],
    )
    .await?;

    for sql in fractional_second_columns(backend) {
        db.execute(Statement::from_string(backend, sql))
            .await
            .map_err(|e| {
                tracing::error!("Failed to widen datetime column: {}", e);
                e
            })?;
    }

    info!("Database schema synchronization completed.");
    Ok(())
}

/// 읽지 않은 응원 판단은 열람 시각과 응원 시각을 엄격히 비교합니다.
/// MySQL의 기본 `DATETIME`은 초 단위로 잘리므로 두 컬럼을 마이크로초 정밀도로 바꿉니다.
fn fractional_second_columns(backend: DatabaseBackend) -> Vec<String> {
    match backend {
        DatabaseBackend::MySql => vec![
            "ALTER TABLE goal MODIFY COLUMN last_viewed_at DATETIME(6) NULL".to_string(),
            "ALTER TABLE goal_comment MODIFY COLUMN created_at DATETIME(6) NOT NULL".to_string(),
        ],
        _ => Vec::new(),
    }
}

fn is_already_exists(err: &DbErr) -> bool {
    let err_str = err.to_string().to_lowercase();
    err_str.contains("duplicate") || err_str.contains("already exists")
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let sql = format!(
        "CREATE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    match db.execute(Statement::from_string(backend, sql)).await {
        Ok(_) => Ok(()),
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    match db.execute(Statement::from_string(backend, sql)).await {
        Ok(_) => Ok(()),
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create unique index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table: {}", e);
        e
    })
}
