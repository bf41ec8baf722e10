use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY,
            station_id VARCHAR(255) NOT NULL,
            connector_id VARCHAR(255) NOT NULL,
            date TIMESTAMP WITH TIME ZONE NOT NULL,
            start_time VARCHAR(32) NOT NULL,
            end_time VARCHAR(32) NOT NULL,
            station_name TEXT NOT NULL,
            station_image TEXT NOT NULL,
            user_id VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One booking per exact range, enforced on insert and on update
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uq_bookings_slot
            ON bookings(station_id, connector_id, date, start_time, end_time);
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_station_connector_date ON bookings(station_id, connector_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
