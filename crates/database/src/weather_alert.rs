//! Weather alert storage.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewWeatherAlert, WeatherAlert};

/// Insert an alert, or replace every non-key field of an existing one.
///
/// `created_at` is set on first insert and left untouched on replace.
pub async fn upsert_alert(pool: &SqlitePool, alert: &NewWeatherAlert) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO weather_alerts
            (id, area_desc, event, severity, certainty, urgency, headline,
             description, instruction, sent, effective, expires, status,
             message_type, sender_name, web, geometry_type)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            area_desc = excluded.area_desc,
            event = excluded.event,
            severity = excluded.severity,
            certainty = excluded.certainty,
            urgency = excluded.urgency,
            headline = excluded.headline,
            description = excluded.description,
            instruction = excluded.instruction,
            sent = excluded.sent,
            effective = excluded.effective,
            expires = excluded.expires,
            status = excluded.status,
            message_type = excluded.message_type,
            sender_name = excluded.sender_name,
            web = excluded.web,
            geometry_type = excluded.geometry_type
        "#,
    )
    .bind(&alert.id)
    .bind(&alert.area_desc)
    .bind(&alert.event)
    .bind(&alert.severity)
    .bind(&alert.certainty)
    .bind(&alert.urgency)
    .bind(&alert.headline)
    .bind(&alert.description)
    .bind(&alert.instruction)
    .bind(&alert.sent)
    .bind(&alert.effective)
    .bind(&alert.expires)
    .bind(&alert.status)
    .bind(&alert.message_type)
    .bind(&alert.sender_name)
    .bind(&alert.web)
    .bind(&alert.geometry_type)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get an alert by ID.
pub async fn get_alert(pool: &SqlitePool, id: &str) -> Result<WeatherAlert> {
    sqlx::query_as::<_, WeatherAlert>(
        r#"
        SELECT id, area_desc, event, severity, certainty, urgency, headline,
               description, instruction, sent, effective, expires, status,
               message_type, sender_name, web, geometry_type, created_at
        FROM weather_alerts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "WeatherAlert",
        id: id.to_string(),
    })
}

/// List all stored alerts.
pub async fn list_alerts(pool: &SqlitePool) -> Result<Vec<WeatherAlert>> {
    let alerts = sqlx::query_as::<_, WeatherAlert>(
        r#"
        SELECT id, area_desc, event, severity, certainty, urgency, headline,
               description, instruction, sent, effective, expires, status,
               message_type, sender_name, web, geometry_type, created_at
        FROM weather_alerts
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(alerts)
}

/// Count stored alerts.
pub async fn count_alerts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM weather_alerts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    #[tokio::test]
    async fn test_upsert_replaces_fields() {
        let db = test_db().await;

        let mut first = NewWeatherAlert::new("dup");
        first.event = Some("Flood Watch".to_string());
        first.severity = Some("Moderate".to_string());
        first.instruction = Some("Move to higher ground.".to_string());
        upsert_alert(db.pool(), &first).await.unwrap();

        let mut second = NewWeatherAlert::new("dup");
        second.event = Some("Flood Warning".to_string());
        second.severity = Some("Severe".to_string());
        upsert_alert(db.pool(), &second).await.unwrap();

        assert_eq!(count_alerts(db.pool()).await.unwrap(), 1);
        let stored = get_alert(db.pool(), "dup").await.unwrap();
        assert_eq!(stored.event.as_deref(), Some("Flood Warning"));
        assert_eq!(stored.severity.as_deref(), Some("Severe"));
        // Fields absent from the second write are cleared, not merged.
        assert_eq!(stored.instruction, None);
    }

    #[tokio::test]
    async fn test_upsert_preserves_created_at() {
        let db = test_db().await;

        upsert_alert(db.pool(), &NewWeatherAlert::new("keep")).await.unwrap();
        sqlx::query("UPDATE weather_alerts SET created_at = '2020-01-01 00:00:00' WHERE id = ?")
            .bind("keep")
            .execute(db.pool())
            .await
            .unwrap();

        let mut replacement = NewWeatherAlert::new("keep");
        replacement.status = Some("Actual".to_string());
        upsert_alert(db.pool(), &replacement).await.unwrap();

        let stored = get_alert(db.pool(), "keep").await.unwrap();
        assert_eq!(stored.created_at, "2020-01-01 00:00:00");
        assert_eq!(stored.status.as_deref(), Some("Actual"));
    }

    #[tokio::test]
    async fn test_list_alerts_ordered_by_id() {
        let db = test_db().await;
        for id in ["c", "a", "b"] {
            upsert_alert(db.pool(), &NewWeatherAlert::new(id)).await.unwrap();
        }

        let ids: Vec<String> = list_alerts(db.pool())
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
