use std::sync::Arc;

use anyhow::Context;

use meister_catalog::{storefront, Catalog};
use meister_infra::{AppConfig, EmailConfig, OrderRepository, PostgresOrderRepository};
use meister_notifications::{MailSettings, NotificationDispatcher, NotificationError, ResendMailer};

/// Everything a request handler needs; shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    /// `None` when no database is configured.
    pub repository: Option<Arc<dyn OrderRepository>>,
    pub notifications: NotificationDispatcher,
    pub catalog: &'static Catalog,
}

impl AppServices {
    pub fn new(
        repository: Option<Arc<dyn OrderRepository>>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            repository,
            notifications,
            catalog: storefront(),
        }
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("repository", &self.repository.is_some())
            .field("notifications", &self.notifications)
            .field("catalog_len", &self.catalog.len())
            .finish()
    }
}

pub fn mail_settings(email: &EmailConfig) -> MailSettings {
    MailSettings {
        from_email: email.from_email.clone(),
        from_name: email.from_name.trim().to_string(),
        reply_to: email.reply_to.clone(),
        business_email: email.business_email.clone(),
    }
}

/// Dispatcher for the configured provider, or a disabled one without a key.
pub fn build_dispatcher(email: &EmailConfig) -> Result<NotificationDispatcher, NotificationError> {
    let settings = mail_settings(email);
    match &email.api_key {
        Some(key) => {
            let mailer = ResendMailer::new(&email.api_url, key.clone(), email.timeout)?;
            Ok(NotificationDispatcher::new(Arc::new(mailer), settings))
        }
        None => Ok(NotificationDispatcher::disabled(settings)),
    }
}

/// Production wiring: lazy Postgres pool (schema ensured best effort) and the
/// Resend client.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let repository: Option<Arc<dyn OrderRepository>> = match &config.database {
        Some(db) => {
            let repo = PostgresOrderRepository::connect_lazy(&db.url, db.timeout)
                .context("failed to configure order store")?;
            // The database may come up after us; inserts report their own errors.
            if let Err(e) = repo.ensure_schema().await {
                tracing::warn!(error = %e, "could not ensure orders schema");
            }
            let repo: Arc<dyn OrderRepository> = Arc::new(repo);
            Some(repo)
        }
        None => None,
    };

    let notifications =
        build_dispatcher(&config.email).context("failed to configure email client")?;

    Ok(AppServices::new(repository, notifications))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn email(api_key: Option<&str>) -> EmailConfig {
        EmailConfig {
            api_key: api_key.map(str::to_string),
            api_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(10),
            business_email: "shop@example.de".to_string(),
            from_email: "onboarding@resend.dev".to_string(),
            from_name: "  ARCHITEKTUNDMEISTER ".to_string(),
            reply_to: "reply@example.de".to_string(),
        }
    }

    #[test]
    fn dispatcher_is_disabled_without_key() {
        assert!(!build_dispatcher(&email(None)).unwrap().is_enabled());
        assert!(build_dispatcher(&email(Some("re_x"))).unwrap().is_enabled());
    }

    #[test]
    fn settings_trim_display_name() {
        let settings = mail_settings(&email(None));
        assert_eq!(settings.from_name, "ARCHITEKTUNDMEISTER");
        assert_eq!(settings.reply_to, "reply@example.de");
        assert_eq!(settings.business_email, "shop@example.de");
    }
}
