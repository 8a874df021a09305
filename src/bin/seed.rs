use food_rescue_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    money::Money,
    services::auth_service::hash_password,
};

struct Provider {
    email: &'static str,
    name: &'static str,
    rating: f64,
    reviews: i32,
}

struct Listing {
    provider: &'static str,
    name: &'static str,
    price: &'static str,
    weight: i32,
    distance: &'static str,
    availability: &'static str,
    location_details: &'static str,
    description_title: &'static str,
    description_content: &'static str,
}

const PROVIDERS: &[Provider] = &[
    Provider { email: "lisa@example.com", name: "Lisa", rating: 4.9, reviews: 22 },
    Provider { email: "budi@example.com", name: "Budi", rating: 4.8, reviews: 15 },
    Provider { email: "sarah@example.com", name: "Sarah", rating: 4.7, reviews: 31 },
];

const LISTINGS: &[Listing] = &[
    Listing {
        provider: "lisa@example.com",
        name: "Steak Kentang",
        price: "Rp 10.000",
        weight: 500,
        distance: "2.0 km",
        availability: "Tersedia sejak 16.30",
        location_details: "Jl. Ganesa No.10, Lb. Siliwangi, Kecamatan Coblong, Kota Bandung, Jawa Barat 40132",
        description_title: "Steak Sirloin Sisa Acara Kantor",
        description_content: "Ada 2 porsi steak sirloin medium well, dibungkus rapi langsung dari restorannya dan belum dibuka sama sekali.",
    },
    Listing {
        provider: "budi@example.com",
        name: "Nasi Gudeg",
        price: "Rp 8.000",
        weight: 400,
        distance: "1.5 km",
        availability: "Tersedia sejak 17.00",
        location_details: "Jl. Dipatiukur No.35, Lebak Gede, Kecamatan Coblong, Kota Bandung, Jawa Barat 40132",
        description_title: "Gudeg Jogja Sisa Acara Keluarga",
        description_content: "Gudeg buatan sendiri dengan bumbu tradisional, masih banyak dan sayang kalau dibuang.",
    },
    Listing {
        provider: "sarah@example.com",
        name: "Pizza Margherita",
        price: "Rp 15.000",
        weight: 700,
        distance: "3.2 km",
        availability: "Tersedia sejak 18.00",
        location_details: "Jl. Setiabudi No.229, Isola, Kec. Sukasari, Kota Bandung, Jawa Barat 40154",
        description_title: "Pizza Sisa Pesta Ulang Tahun",
        description_content: "Pizza margherita ukuran medium sisa pesta ulang tahun, masih utuh dan fresh.",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 1).await?;
    run_migrations(&pool).await?;

    for provider in PROVIDERS {
        let id = ensure_provider(&pool, provider, "rahasia123").await?;
        println!("Ensured provider {} (id={id})", provider.email);
    }
    seed_food_items(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_provider(
    pool: &sqlx::PgPool,
    provider: &Provider,
    password: &str,
) -> anyhow::Result<i64> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_hash, name, avatar, rating, reviews_count, is_verified)
        VALUES ($1, $2, $3, '/placeholder.svg?height=40&width=40', $4, $5, TRUE)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(provider.email)
    .bind(password_hash)
    .bind(provider.name)
    .bind(provider.rating)
    .bind(provider.reviews)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

async fn seed_food_items(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM food_items")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Food items already exist, skipping");
        return Ok(());
    }

    for listing in LISTINGS {
        let price = Money::parse(listing.price)?;
        sqlx::query(
            r#"
            INSERT INTO food_items (
                provider_id, name, distance, availability, image_url,
                location_address, location_details, description_title, description_content,
                price_patungan, weight, type
            )
            SELECT u.id, $2, $3, $4, '/steak-image.jpg', 'Lokasi Pengambilan', $5, $6, $7, $8, $9, 'donasi'
            FROM users u WHERE u.email = $1
            "#,
        )
        .bind(listing.provider)
        .bind(listing.name)
        .bind(listing.distance)
        .bind(listing.availability)
        .bind(listing.location_details)
        .bind(listing.description_title)
        .bind(listing.description_content)
        .bind(price.get())
        .bind(listing.weight)
        .execute(pool)
        .await?;
    }

    println!("Seeded food items");
    Ok(())
}
