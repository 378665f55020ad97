//! Session bootstrap: the identity query run once at start-up.

use std::sync::Arc;

use crate::controller::ConversationController;
use crate::error::{MailmateError, Result};
use crate::gateway::EmailGateway;
use crate::session::Identity;
use crate::transcript::TranscriptSink;

/// What the caller has to do after bootstrap.
pub enum BootstrapOutcome {
    /// Signed in; the conversation is ready with its welcome entry.
    Ready(ConversationController),
    /// Not signed in; send the user to `login_url`. The conversation is never started.
    LoginRequired { login_url: String },
}

/// Resolves the current session and opens the conversation for it.
pub struct SessionBootstrap {
    gateway: Arc<dyn EmailGateway>,
}

impl SessionBootstrap {
    pub fn new(gateway: Arc<dyn EmailGateway>) -> Self {
        Self { gateway }
    }

    /// Queries the backend for the current identity.
    ///
    /// An `Unauthenticated` error from the gateway is folded into
    /// [`Identity::Unauthenticated`]; any other failure is returned.
    pub async fn identify(&self) -> Result<Identity> {
        match self.gateway.identify().await {
            Ok(identity) => Ok(identity),
            Err(MailmateError::Unauthenticated) => Ok(Identity::Unauthenticated),
            Err(e) => {
                tracing::error!("[Bootstrap] Identity query failed: {}", e);
                Err(e)
            }
        }
    }

    /// Identifies the user and, when signed in, starts the conversation.
    pub async fn run(self, sink: Arc<dyn TranscriptSink>) -> Result<BootstrapOutcome> {
        match self.identify().await? {
            Identity::Authenticated(session) => {
                tracing::info!("[Bootstrap] Signed in as {}", session.display_name);
                let controller = ConversationController::start(self.gateway, session, sink)
                    .map_err(|e| MailmateError::internal(e.to_string()))?;
                Ok(BootstrapOutcome::Ready(controller))
            }
            Identity::Unauthenticated => {
                let login_url = self.gateway.login_url();
                tracing::info!("[Bootstrap] No session; login required at {}", login_url);
                Ok(BootstrapOutcome::LoginRequired { login_url })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{DeleteOutcome, ReplyDraft};
    use crate::intent::EmailIndex;
    use crate::session::Session;
    use crate::transcript::NullSink;
    use serde_json::Value;

    struct IdentityOnlyGateway {
        identity: Result<Identity>,
    }

    #[async_trait::async_trait]
    impl EmailGateway for IdentityOnlyGateway {
        async fn identify(&self) -> Result<Identity> {
            self.identity.clone()
        }

        async fn list_recent(&self) -> Result<Value> {
            unreachable!("bootstrap never lists emails")
        }

        async fn reply(&self, _index: EmailIndex) -> Result<ReplyDraft> {
            unreachable!("bootstrap never replies")
        }

        async fn delete(&self, _index: EmailIndex) -> Result<DeleteOutcome> {
            unreachable!("bootstrap never deletes")
        }

        async fn logout(&self) -> Result<String> {
            unreachable!("bootstrap never logs out")
        }

        fn login_url(&self) -> String {
            "http://backend/auth/google/login".to_string()
        }
    }

    fn bootstrap(identity: Result<Identity>) -> SessionBootstrap {
        SessionBootstrap::new(Arc::new(IdentityOnlyGateway { identity }))
    }

    #[tokio::test]
    async fn test_authenticated_starts_conversation_with_welcome() {
        let outcome = bootstrap(Ok(Identity::Authenticated(Session::new("Ann"))))
            .run(Arc::new(NullSink))
            .await
            .unwrap();

        let BootstrapOutcome::Ready(controller) = outcome else {
            panic!("expected a ready conversation");
        };
        assert_eq!(controller.session().display_name, "Ann");
        assert_eq!(controller.transcript().len(), 1);
        assert!(controller.transcript().entries()[0].text.contains("Ann"));
    }

    #[tokio::test]
    async fn test_unauthenticated_requires_login() {
        for identity in [
            Ok(Identity::Unauthenticated),
            Err(MailmateError::Unauthenticated),
        ] {
            let outcome = bootstrap(identity).run(Arc::new(NullSink)).await.unwrap();
            match outcome {
                BootstrapOutcome::LoginRequired { login_url } => {
                    assert_eq!(login_url, "http://backend/auth/google/login");
                }
                BootstrapOutcome::Ready(_) => panic!("expected login redirect"),
            }
        }
    }

    #[tokio::test]
    async fn test_other_failures_propagate() {
        let result = bootstrap(Err(MailmateError::transport("connection refused")))
            .identify()
            .await;
        assert_eq!(result, Err(MailmateError::transport("connection refused")));
    }
}
