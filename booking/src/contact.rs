use abi::{
    ContactInfo, ContactInfoForm, ContactMessage, Error, MessageId, MessageStatus,
    NewContactMessage, Normalizer,
};
use async_trait::async_trait;
use tracing::info;

use crate::{BookingManager, Inbox};

const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, status::TEXT AS status, created_at";

#[async_trait]
impl Inbox for BookingManager {
    async fn contact_info(&self) -> Result<ContactInfo, Error> {
        let info = sqlx::query_as(
            "SELECT phone, email, whatsapp, address, instagram, updated_at FROM stay.contact_info WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(info)
    }

    async fn update_contact_info(&self, mut form: ContactInfoForm) -> Result<ContactInfo, Error> {
        form.normalize()?;
        let info = sqlx::query_as(
            r#"
            INSERT INTO stay.contact_info (id, phone, email, whatsapp, address, instagram)
            VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                whatsapp = EXCLUDED.whatsapp,
                address = EXCLUDED.address,
                instagram = EXCLUDED.instagram,
                updated_at = now()
            RETURNING phone, email, whatsapp, address, instagram, updated_at
            "#,
        )
        .bind(&form.phone)
        .bind(&form.email)
        .bind(&form.whatsapp)
        .bind(&form.address)
        .bind(&form.instagram)
        .fetch_one(&self.pool)
        .await?;
        info!("contact info updated");
        Ok(info)
    }

    async fn submit_message(&self, mut msg: NewContactMessage) -> Result<ContactMessage, Error> {
        msg.normalize()?;
        let sql = format!(
            "INSERT INTO stay.contact_messages (name, email, subject, message) VALUES ($1, $2, $3, $4) RETURNING {}",
            MESSAGE_COLUMNS
        );
        let msg: ContactMessage = sqlx::query_as(&sql)
            .bind(&msg.name)
            .bind(&msg.email)
            .bind(&msg.subject)
            .bind(&msg.message)
            .fetch_one(&self.pool)
            .await?;
        info!(id = msg.id, "contact message received");
        Ok(msg)
    }

    async fn messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>, Error> {
        let sql = format!(
            "SELECT {} FROM stay.contact_messages WHERE ($1::TEXT IS NULL OR status::TEXT = $1) \
             ORDER BY created_at DESC, id DESC",
            MESSAGE_COLUMNS
        );
        let messages = sqlx::query_as(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        Ok(messages)
    }

    async fn set_message_status(
        &self,
        id: MessageId,
        status: MessageStatus,
    ) -> Result<ContactMessage, Error> {
        let sql = format!(
            "UPDATE stay.contact_messages SET status = $2::stay.message_status WHERE id = $1 RETURNING {}",
            MESSAGE_COLUMNS
        );
        let msg = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(msg)
    }

    async fn delete_message(&self, id: MessageId) -> Result<(), Error> {
        let ret = sqlx::query("DELETE FROM stay.contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if ret.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}
