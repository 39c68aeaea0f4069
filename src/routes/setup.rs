use crate::{
    auth::hash_password,
    error::AppError,
    models::{User, UserInput},
    state::AppState,
    store::Store,
};
use actix_web::{get, web, HttpResponse, Responder};

pub const SETUP_COMPLETE: &str = "System setup complete! Users created.";
pub const ALREADY_SET_UP: &str = "System already setup.";

/// Password shared by the two seeded accounts.
pub const DEFAULT_PASSWORD: &str = "123";

fn default_accounts() -> [UserInput; 2] {
    [
        UserInput {
            username: "admin".into(),
            password: DEFAULT_PASSWORD.into(),
            name: Some("General Manager".into()),
            role: Some("admin".into()),
        },
        UserInput {
            username: "user".into(),
            password: DEFAULT_PASSWORD.into(),
            name: Some("Demo Employee".into()),
            role: Some("employee".into()),
        },
    ]
}

/// Inserts the `admin` and `user` accounts when the user table is empty.
///
/// Returns `false` without writing anything if any user already exists.
pub async fn seed_default_accounts(store: &dyn Store, bcrypt_cost: u32) -> Result<bool, AppError> {
    if store.count_users().await? > 0 {
        return Ok(false);
    }

    for account in default_accounts() {
        let hash = hash_password(&account.password, bcrypt_cost)?;
        store.insert_user(User::new(account, hash)).await?;
    }
    Ok(true)
}

/// One-time bootstrap. Answers with a plaintext status line.
#[get("/setup")]
pub async fn setup(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let message = if seed_default_accounts(state.store.as_ref(), state.bcrypt_cost).await? {
        log::info!("seeded default accounts");
        SETUP_COMPLETE
    } else {
        ALREADY_SET_UP
    };

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::authenticate;
    use crate::store::MemoryStore;
    // bcrypt keeps its MIN_COST (4) private; mirror it for tests.
    const MIN_COST: u32 = 4;

    #[actix_rt::test]
    async fn test_seed_runs_once() {
        let store = MemoryStore::new();

        assert!(seed_default_accounts(&store, MIN_COST).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 2);

        assert!(!seed_default_accounts(&store, MIN_COST).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 2);
    }

    #[actix_rt::test]
    async fn test_seeded_accounts_can_log_in() {
        let store = MemoryStore::new();
        seed_default_accounts(&store, MIN_COST).await.unwrap();

        let admin = authenticate(&store, "admin", DEFAULT_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, "admin");

        let employee = authenticate(&store, "user", DEFAULT_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.role, "employee");
    }

    #[actix_rt::test]
    async fn test_seed_skipped_when_any_user_exists() {
        let store = MemoryStore::new();
        let [first, _] = default_accounts();
        store
            .insert_user(User::new(first, "hash".into()))
            .await
            .unwrap();

        assert!(!seed_default_accounts(&store, MIN_COST).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 1);
    }
}
