//! Drives the app from the command line against an in-memory host.
//!
//! ```text
//! cargo run --example weather_cli --features logging -- Berlin Atlantis
//! RUST_LOG=skycast=debug cargo run --example weather_cli --features logging
//! ```

use std::sync::Arc;

use skycast::{
    App, Config, FileStorage, Host, LogWriter, MemoryHost, StaticLocation, StaticWeather,
    WeatherData,
};
use tracing_subscriber::EnvFilter;

fn catalog() -> StaticWeather {
    StaticWeather::new()
        .with_city(
            "Berlin",
            WeatherData::new(14.6, 40.0, 13.2, "clear sky").with_wind(3.1),
        )
        .with_city(
            "Moscow",
            WeatherData::new(-4.2, 86.0, -9.0, "light snow").with_wind(5.0),
        )
        .with_city("New York", WeatherData::new(21.3, 58.0, 21.0, "haze"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=info")),
        )
        .init();

    let dir = std::env::temp_dir().join("skycast-demo");
    let host = Arc::new(MemoryHost::new("/").with_nav_links(["/", "/about"]));
    let app = App::builder(Config::default())
        .with_host(host.clone())
        .with_storage(Arc::new(FileStorage::open(&dir)?))
        .with_weather(Arc::new(catalog()))
        .with_geolocator(Arc::new(StaticLocation::city("Moscow")))
        .with_subscriber(Arc::new(LogWriter::new()))
        .build();

    if let Some(start) = app.init() {
        start.finished().await;
    }

    let mut cities: Vec<String> = std::env::args().skip(1).collect();
    if cities.is_empty() {
        cities = vec!["Berlin".into(), "Atlantis".into(), "New York".into()];
    }

    for city in &cities {
        if let Ok(Some(dispatch)) = app.search_city(city).await {
            dispatch.finished().await;
        }
        println!("== {} ==\n{}", host.location(), app.view().render());
        app.back();
    }

    if let Ok(Some(dispatch)) = app.search_geo().await {
        dispatch.finished().await;
        println!("== {} ==\n{}", host.location(), app.view().render());
        app.back();
    }

    println!("== {} ==\n{}", host.location(), app.view().render());
    Ok(())
}
