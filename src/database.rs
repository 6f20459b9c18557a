use mongodb::{Client, Database};

const DATABASE_NAME: &str = "fms";

static mut DB: Option<Database> = None;

pub async fn connect(uri: String) {
    let client = Client::with_uri_str(&uri)
        .await
        .expect("Failed to connect to database");
    log::info!("connected to {uri}, using database {DATABASE_NAME}");
    unsafe {
        DB = Some(client.database(DATABASE_NAME));
    }
}

pub fn get_db() -> Database {
    unsafe {
        let db = &DB;
        db.clone().expect("Database is not available yet!")
    }
}
