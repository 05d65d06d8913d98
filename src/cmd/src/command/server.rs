use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use common::config::Config;
use common::rbac::Role;
use common::DATA_PATH_METADATA;
use metadata::accounts::CreateAccountRequest;
use metadata::error::MetadataError;
use metadata::MetadataProvider;
use platform::auth::password::make_password_hash;
use platform::http::attach_routes;
use platform::PlatformProvider;
use tokio::select;
use tokio::signal::unix::SignalKind;
use tracing::debug;
use tracing::info;

use crate::error::Result;

pub async fn start(cfg: Config) -> Result<()> {
    debug!("data path: {:?}", cfg.data.path);

    fs::create_dir_all(&cfg.data.path)?;
    let db = Arc::new(metadata::rocksdb::new(
        cfg.data.path.join(DATA_PATH_METADATA),
    )?);
    let md = Arc::new(MetadataProvider::try_new(db)?);

    info!("provisioning seed accounts...");
    seed_account(&md, &cfg.seed.admin_email, &cfg.seed.admin_password, vec![
        Role::Admin,
        Role::User,
    ])?;
    seed_account(&md, &cfg.seed.user_email, &cfg.seed.user_password, vec![
        Role::User,
    ])?;

    let platform = Arc::new(PlatformProvider::new(md.clone(), &cfg));
    let router = attach_routes(Router::new(), &md, &platform, &cfg);

    let signal = async {
        let mut sig_int =
            tokio::signal::unix::signal(SignalKind::interrupt()).expect("failed to install signal");
        let mut sig_term =
            tokio::signal::unix::signal(SignalKind::terminate()).expect("failed to install signal");
        select! {
            _=sig_int.recv()=>info!("SIGINT received"),
            _=sig_term.recv()=>info!("SIGTERM received"),
        }
    };

    info!("listening on http://{}", cfg.server.host);
    let listener = tokio::net::TcpListener::bind(cfg.server.host).await?;
    Ok(axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(signal)
    .await?)
}

/// Idempotent across restarts: an already provisioned email is left as is.
fn seed_account(
    md: &Arc<MetadataProvider>,
    email: &str,
    password: &str,
    roles: Vec<Role>,
) -> Result<()> {
    match md.accounts.get_by_email(email) {
        Ok(_) => Ok(()),
        Err(MetadataError::NotFound(_)) => {
            info!("creating account {email}...");
            md.accounts.create(CreateAccountRequest {
                created_by: None,
                password_hash: make_password_hash(password)?,
                email: email.to_string(),
                roles,
            })?;

            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}
