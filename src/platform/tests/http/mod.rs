mod auth;

#[cfg(test)]
mod tests {
    use std::env::temp_dir;
    use std::net::SocketAddr;
    use std::str::FromStr;
    use std::sync::Arc;

    use axum::Router;
    use chrono::Duration;
    use common::config;
    use common::config::Config;
    use common::rbac::Role;
    use metadata::accounts::Account;
    use metadata::MetadataProvider;
    use platform::auth::password::make_password_hash;
    use platform::auth::TokensResponse;
    use platform::http::attach_routes;
    use platform::PlatformProvider;
    use reqwest::header::HeaderMap;
    use reqwest::header::HeaderValue;
    use reqwest::header::AUTHORIZATION;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::Client;
    use reqwest::StatusCode;
    use tracing::level_filters::LevelFilter;
    use uuid::Uuid;

    pub const CLIENT_ID: &str = "eventum";
    pub const CLIENT_SECRET: &str = "eventum-secret";

    fn test_config() -> Config {
        Config {
            server: config::Server {
                host: SocketAddr::from_str("127.0.0.1:0").unwrap(),
            },
            data: config::Data {
                path: Default::default(),
            },
            auth: config::Auth {
                access_token_duration: Duration::days(1),
                refresh_token_duration: Duration::days(1),
                access_token_key: "access key".to_string(),
                refresh_token_key: "refresh key".to_string(),
            },
            client: config::Client {
                id: CLIENT_ID.to_string(),
                secret: CLIENT_SECRET.to_string(),
            },
            seed: config::Seed {
                admin_email: "admin@mail.com".to_string(),
                admin_password: "admin".to_string(),
                user_email: "user@mail.com".to_string(),
                user_password: "user".to_string(),
            },
            log: config::Log {
                level: LevelFilter::INFO,
            },
        }
    }

    pub async fn run_http_service()
    -> anyhow::Result<(String, Arc<MetadataProvider>, Arc<PlatformProvider>)> {
        let path = temp_dir().join(Uuid::new_v4().to_string());
        let db = Arc::new(metadata::rocksdb::new(path.join("md"))?);
        let md = Arc::new(MetadataProvider::try_new(db)?);

        let cfg = test_config();
        let platform_provider = Arc::new(PlatformProvider::new(md.clone(), &cfg));

        let router = attach_routes(Router::new(), &md, &platform_provider, &cfg);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Ok((format!("http://{addr}"), md, platform_provider))
    }

    pub fn create_account(
        md: &Arc<MetadataProvider>,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Account> {
        Ok(md.accounts.create(metadata::accounts::CreateAccountRequest {
            created_by: None,
            password_hash: make_password_hash(password)?,
            email: email.to_string(),
            roles: vec![Role::User],
        })?)
    }

    pub async fn log_in(base_url: &str, email: &str, password: &str) -> anyhow::Result<HeaderMap> {
        let cl = Client::new();
        let resp = cl
            .post(format!("{base_url}/oauth/token"))
            .basic_auth(CLIENT_ID, Some(CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", email),
                ("password", password),
            ])
            .send()
            .await?;
        anyhow::ensure!(
            resp.status() == StatusCode::OK,
            "log in failed: {}",
            resp.text().await?
        );
        let tokens: TokensResponse = resp.json().await?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str("application/json")?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(format!("Bearer {}", tokens.access_token).as_str())?,
        );

        Ok(headers)
    }

    pub async fn create_account_and_login(
        md: &Arc<MetadataProvider>,
        base_url: &str,
        email: &str,
    ) -> anyhow::Result<HeaderMap> {
        let pwd = "password";
        create_account(md, email, pwd)?;

        log_in(base_url, email, pwd).await
    }

    pub fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    #[macro_export]
    macro_rules! assert_response_status_eq {
        ($resp:expr,$status:expr) => {{
            assert_eq!(
                $resp.status(),
                $status,
                "{}",
                $resp.text().await.unwrap().as_str()
            )
        }};
    }
}
