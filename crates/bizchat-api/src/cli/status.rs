//! System status command.

use crate::state::AppState;

/// Print row counts and the registered provider set.
pub async fn status(state: &AppState) -> anyhow::Result<()> {
    let users = count(state, "users").await?;
    let sessions = count(state, "chat_sessions").await?;
    let messages = count(state, "chat_messages").await?;

    println!();
    println!("  Bizchat status");
    println!();
    println!("  users:     {users}");
    println!("  sessions:  {sessions}");
    println!("  messages:  {messages}");

    let mut providers: Vec<String> = state
        .chat_service
        .dispatcher()
        .provider_ids()
        .iter()
        .map(|p| p.to_string())
        .collect();
    providers.sort();
    println!(
        "  providers: {} (default: {})",
        if providers.is_empty() {
            "none".to_string()
        } else {
            providers.join(", ")
        },
        state.chat_service.dispatcher().default_provider()
    );
    println!();

    Ok(())
}

async fn count(state: &AppState, table: &str) -> anyhow::Result<i64> {
    // Table names come from the fixed list above, never from input.
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.db_pool.reader)
        .await?;
    Ok(row.0)
}
