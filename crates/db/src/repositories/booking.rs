use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use evslot_core::{
    errors::{SlotError, SlotResult},
    models::booking::{Booking, NewBooking, SlotKey},
    repository::BookingRepository,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbBooking;

const BOOKING_COLUMNS: &str = "id, station_id, connector_id, date, start_time, end_time, \
     station_name, station_image, user_id, created_at";

pub async fn insert_booking(pool: &Pool<Postgres>, booking: &NewBooking) -> Result<DbBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, station_id={}, connector_id={}, date={}",
        id, booking.station_id, booking.connector_id, booking.date
    );

    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings (id, station_id, connector_id, date, start_time, end_time,
                              station_name, station_image, user_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&booking.station_id)
    .bind(&booking.connector_id)
    .bind(booking.date.utc_midnight())
    .bind(&booking.start_time)
    .bind(&booking.end_time)
    .bind(&booking.station_name)
    .bind(&booking.station_image)
    .bind(&booking.user_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn find_bookings_by_slot(pool: &Pool<Postgres>, key: &SlotKey) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE station_id = $1 AND connector_id = $2 AND date = $3
          AND start_time = $4 AND end_time = $5
        "#
    ))
    .bind(&key.station_id)
    .bind(&key.connector_id)
    .bind(key.date.utc_midnight())
    .bind(&key.start_time)
    .bind(&key.end_time)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn find_bookings_in_range(
    pool: &Pool<Postgres>,
    station_id: &str,
    connector_id: &str,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Result<Vec<DbBooking>> {
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE station_id = $1 AND connector_id = $2
          AND date >= $3 AND date < $4
        "#
    ))
    .bind(station_id)
    .bind(connector_id)
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn find_bookings_by_user(pool: &Pool<Postgres>, user_id: &str) -> Result<Vec<DbBooking>> {
    // start_time is ordered as raw text
    let rows = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE user_id = $1
        ORDER BY date DESC, start_time COLLATE "C" DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn find_booking_for_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    user_id: &str,
) -> Result<Option<DbBooking>> {
    tracing::debug!("Getting booking by id: {} for user: {}", id, user_id);

    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE id = $1 AND user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_booking_times(
    pool: &Pool<Postgres>,
    id: Uuid,
    start_time: &str,
    end_time: &str,
) -> Result<DbBooking> {
    let row = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET start_time = $2, end_time = $3
        WHERE id = $1
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn delete_booking(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

fn is_unique_violation(report: &eyre::Report) -> bool {
    matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(err)) if err.is_unique_violation()
    )
}

/// PostgreSQL-backed [`BookingRepository`].
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: Pool<Postgres>,
}

impl PgBookingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn find_by_slot(&self, key: &SlotKey) -> SlotResult<Vec<Booking>> {
        let rows = find_bookings_by_slot(&self.pool, key).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_in_range(
        &self,
        station_id: &str,
        connector_id: &str,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> SlotResult<Vec<Booking>> {
        let rows = find_bookings_in_range(&self.pool, station_id, connector_id, from, until).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_by_user(&self, user_id: &str) -> SlotResult<Vec<Booking>> {
        let rows = find_bookings_by_user(&self.pool, user_id).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_owned(&self, id: Uuid, user_id: &str) -> SlotResult<Option<Booking>> {
        let row = find_booking_for_user(&self.pool, id, user_id).await?;
        Ok(row.map(Booking::from))
    }

    async fn create(&self, booking: NewBooking) -> SlotResult<Booking> {
        match insert_booking(&self.pool, &booking).await {
            Ok(row) => Ok(row.into()),
            Err(report) if is_unique_violation(&report) => Err(SlotError::SlotUnavailable),
            Err(report) => Err(SlotError::Database(report)),
        }
    }

    async fn save(&self, booking: &Booking) -> SlotResult<Booking> {
        match update_booking_times(&self.pool, booking.id, &booking.start_time, &booking.end_time)
            .await
        {
            Ok(row) => Ok(row.into()),
            Err(report) if is_unique_violation(&report) => Err(SlotError::SlotUnavailable),
            Err(report) => Err(SlotError::Database(report)),
        }
    }

    async fn delete(&self, booking: &Booking) -> SlotResult<()> {
        delete_booking(&self.pool, booking.id).await?;
        Ok(())
    }
}
