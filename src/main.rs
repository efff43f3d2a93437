use rental_api::{Config, build_rocket};

#[rocket::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        }
    };

    let rocket = match build_rocket(config) {
        Ok(rocket) => rocket,
        Err(err) => {
            eprintln!("Failed to start server: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = rocket.launch().await {
        eprintln!("Server stopped: {err}");
        std::process::exit(1);
    }
}
