use anyhow::Context;
use nutrichef_api::{
    db::create_pool,
    seed_data::{CATEGORIES, CUISINES, DEMO_USER_EMAIL, DIETARY_RESTRICTIONS},
    services::seed_service::{ensure_demo_user, seed_lookups},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

    let pool = create_pool(&database_url, 2).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let orm = nutrichef_api::db::orm_from_pool(pool);
    seed_lookups(&orm).await?;
    println!(
        "Seeded {} categories, {} cuisines, {} dietary restrictions",
        CATEGORIES.len(),
        CUISINES.len(),
        DIETARY_RESTRICTIONS.len()
    );

    let user_id = ensure_demo_user(&orm).await?;
    println!("Ensured demo user {DEMO_USER_EMAIL} (id={user_id})");
    Ok(())
}
