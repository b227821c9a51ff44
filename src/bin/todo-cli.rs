use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "todo-cli")]
#[command(about = "Command-line client for the to-do API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3333")]
    url: String,

    /// Acting user for todo commands
    #[arg(short = 'n', long)]
    username: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register { name: String, username: String },
    /// Show a user by id
    User { id: String },
    /// Activate the pro plan for a user
    Upgrade { id: String },
    /// List the acting user's todos
    List,
    /// Create a todo
    Add { title: String, deadline: String },
    /// Replace a todo's title and deadline
    Update {
        id: String,
        title: String,
        deadline: String,
    },
    /// Mark a todo as done
    Done { id: String },
    /// Delete a todo
    Remove { id: String },
    /// Check service status
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = |method: Method, path: &str| -> RequestBuilder {
        let builder = client.request(method, format!("{base}{path}"));
        match &cli.username {
            Some(username) => builder.header("username", username),
            None => builder,
        }
    };

    let builder = match cli.command {
        Commands::Register { name, username } => request(Method::POST, "/users")
            .json(&json!({ "name": name, "username": username })),
        Commands::User { id } => request(Method::GET, &format!("/users/{id}")),
        Commands::Upgrade { id } => request(Method::PATCH, &format!("/users/{id}/pro")),
        Commands::List => request(Method::GET, "/todos"),
        Commands::Add { title, deadline } => {
            request(Method::POST, "/todos").json(&json!({ "title": title, "deadline": deadline }))
        }
        Commands::Update {
            id,
            title,
            deadline,
        } => request(Method::PUT, &format!("/todos/{id}"))
            .json(&json!({ "title": title, "deadline": deadline })),
        Commands::Done { id } => request(Method::PATCH, &format!("/todos/{id}/done")),
        Commands::Remove { id } => request(Method::DELETE, &format!("/todos/{id}")),
        Commands::Health => request(Method::GET, "/health"),
    };

    print_response(builder.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        let body: Option<Value> = serde_json::from_str(&text).ok();
        match body.as_ref().and_then(|b| b.get("error")).and_then(Value::as_str) {
            Some(message) => eprintln!("{}", message),
            None => eprintln!("Response: {}", text),
        }
        std::process::exit(1);
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
