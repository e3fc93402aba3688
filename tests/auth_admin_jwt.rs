use jsonwebtoken::{Algorithm, EncodingKey, Header};
use srk_house::auth::admin_jwt::{issue_admin_jwt, verify_admin_jwt};
use srk_house::auth::password::{hash_password, verify_password};
use srk_house::auth::AdminJwtConfig;
use srk_house::test_utils::test_admin_auth;

fn test_jwt_config() -> AdminJwtConfig {
    test_admin_auth().jwt
}

#[test]
fn admin_jwt_issue_and_verify_round_trip() {
    let cfg = test_jwt_config();
    let token = issue_admin_jwt("admin", &cfg).expect("issue jwt");
    let username = verify_admin_jwt(&token, &cfg).expect("verify jwt");
    assert_eq!(username, "admin");
}

#[test]
fn admin_jwt_wrong_secret_fails() {
    let cfg = test_jwt_config();
    let token = issue_admin_jwt("admin", &cfg).expect("issue jwt");

    let bad_cfg = AdminJwtConfig {
        secret: "wrong-secret".to_string(),
        ..cfg
    };
    assert!(verify_admin_jwt(&token, &bad_cfg).is_err());
}

#[test]
fn admin_jwt_expired_token_fails() {
    let cfg = test_jwt_config();
    // exp=1 is long past
    let claims = serde_json::json!({
        "iss": cfg.issuer,
        "aud": cfg.audience,
        "sub": "admin",
        "iat": 1u64,
        "exp": 1u64,
    });
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .expect("encode");
    assert!(verify_admin_jwt(&token, &cfg).is_err());
}

#[test]
fn admin_jwt_wrong_issuer_or_audience_fails() {
    let cfg = test_jwt_config();
    let token = issue_admin_jwt("admin", &cfg).expect("issue jwt");

    let other_issuer = AdminJwtConfig {
        issuer: "wrong-issuer".to_string(),
        ..cfg.clone()
    };
    assert!(verify_admin_jwt(&token, &other_issuer).is_err());

    let other_audience = AdminJwtConfig {
        audience: "customers".to_string(),
        ..cfg
    };
    assert!(verify_admin_jwt(&token, &other_audience).is_err());
}

#[test]
fn admin_password_hash_checks() {
    let auth = test_admin_auth();
    assert!(verify_password("test-password", &auth.password_hash).expect("verify"));
    assert!(!verify_password("test-passwore", &auth.password_hash).expect("verify"));

    let other = hash_password("test-password").expect("hash");
    assert_ne!(other, auth.password_hash, "salted hashes differ");
}
