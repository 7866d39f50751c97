use sqlchain_core::{params, ExecutorConfig, Query, SortDirection, SqliteExecutor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ExecutorConfig::default().with_default_table(
        "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)",
    );
    let executor = SqliteExecutor::connect(&config).await?;
    let mut query = Query::new(&executor);

    // INSERT with numbered placeholders
    query.insert_into("users", ("name", "age"), params!["John Doe", 34]);
    println!("INSERT SQL: {}", query.build());
    println!("Parameters: {:?}\n", query.parameters());
    query.execute().await?;

    query
        .insert_into("users", ("name", "age"), params!["Jane Doe", 29])
        .execute()
        .await?;

    // SELECT with caller-written markers
    let rows = query
        .select(["id", "name AS full_name"])
        .from("users")
        .where_("age > ?", [30])
        .order_by("id", SortDirection::Asc)
        .execute()
        .await?;
    for row in &rows {
        println!("Row: {}", row.to_json());
    }

    // UPDATE
    query
        .update("users")
        .set(["age"], [35])
        .where_("name = ?", ["John Doe"]);
    println!("\nUPDATE SQL: {}", query.build());
    query.execute().await?;

    // DELETE
    query
        .delete_from("users")
        .where_("age < ?", [30])
        .execute()
        .await?;

    let remaining = query.select("*").from("users").execute().await?;
    println!("Remaining rows: {}", remaining.len());

    query.close().await?;
    Ok(())
}
