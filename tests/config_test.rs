use peacehub_client::api::ApiConfig;

#[test]
fn config_reads_environment_with_local_fallback() {
    dotenvy::dotenv().ok();
    let config = ApiConfig::new_from_env();
    match std::env::var("PEACEHUB_API_BASE_URL") {
        Ok(url) => assert_eq!(config.base_url, url),
        Err(_) => assert_eq!(config.base_url, "http://localhost:8080/api"),
    }
}
