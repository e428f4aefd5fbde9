use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use clap::Parser;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use symposia::utils::normalize_name;

#[derive(Parser, Debug)]
#[command(name = "seed_program")]
#[command(about = "Seed a demo conference program for local development")]
struct Args {
    /// Conference acronym
    #[arg(long, default_value = "RUSTFEST")]
    acronym: String,

    /// Conference year
    #[arg(long, default_value_t = 2026)]
    year: i32,

    /// First conference day (YYYY-MM-DD)
    #[arg(long, default_value = "2026-09-14")]
    first_day: NaiveDate,

    /// Dry run - roll everything back instead of committing
    #[arg(long)]
    dry_run: bool,
}

struct SeededIds {
    conference: Uuid,
    sections: Vec<Uuid>,
    presenters: Vec<Uuid>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let args = Args::parse();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&url).await?;

    let mut tx = pool.begin().await?;
    let seeded = seed(&mut tx, &args).await?;

    if args.dry_run {
        tx.rollback().await?;
        info!("Dry run - rolled back");
    } else {
        tx.commit().await?;
        info!(
            "Seeded conference {} ({}{}) with {} sections and {} presenters",
            seeded.conference,
            args.acronym,
            args.year,
            seeded.sections.len(),
            seeded.presenters.len()
        );
    }

    Ok(())
}

async fn seed(conn: &mut PgConnection, args: &Args) -> Result<SeededIds> {
    let conference = insert_conference(conn, args).await?;

    let talks = insert_category(conn, conference, "Talks", "#1f77b4").await?;
    let workshops = insert_category(conn, conference, "Workshops", "#2ca02c").await?;

    let day_start = Utc
        .from_utc_datetime(&args.first_day.and_hms_opt(9, 0, 0).unwrap());

    // Two overlapping morning slots and a clean afternoon one, so the
    // conflict endpoints have something to report out of the box.
    let sections = vec![
        insert_section(conn, conference, talks, "Opening talks", "Main hall", day_start, day_start + Duration::minutes(60)).await?,
        insert_section(conn, conference, workshops, "Morning workshop", "Room 2", day_start + Duration::minutes(30), day_start + Duration::minutes(90)).await?,
        insert_section(conn, conference, talks, "Afternoon talks", "Main hall", day_start + Duration::hours(5), day_start + Duration::hours(6)).await?,
    ];

    let presenters = vec![
        insert_presenter(conn, "Ada Lovelace", "Analytical Engines Ltd").await?,
        insert_presenter(conn, "Grace Hopper", "Compiler Works").await?,
        insert_presenter(conn, "José García", "Universidad de Pruebas").await?,
    ];

    let keynote = insert_presentation(conn, conference, "Keynote: programs about programs").await?;
    let intro = insert_presentation(conn, conference, "Intro to interval arithmetic").await?;
    let lab = insert_presentation(conn, conference, "Hands-on scheduling lab").await?;

    insert_role(conn, keynote, presenters[0], 0).await?;
    insert_role(conn, intro, presenters[1], 0).await?;
    insert_role(conn, lab, presenters[0], 0).await?;
    insert_role(conn, lab, presenters[2], 1).await?;

    // Place the keynote; the lab shares Ada, so assigning it to the
    // overlapping workshop slot will trip the conflict check.
    assign_section(conn, keynote, sections[0]).await?;
    assign_section(conn, intro, sections[2]).await?;

    // Grace is unavailable on day two.
    insert_full_day_conflict(conn, presenters[1], args.first_day.succ_opt().unwrap()).await?;

    Ok(SeededIds {
        conference,
        sections,
        presenters,
    })
}

async fn insert_conference(conn: &mut PgConnection, args: &Args) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO conferences (acronym, year, name, start_date, end_date, city, country, creator, modifier)
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'seed', 'seed')
         RETURNING id",
    )
    .bind(args.acronym.to_uppercase())
    .bind(args.year)
    .bind(format!("{} {}", args.acronym, args.year))
    .bind(args.first_day)
    .bind(args.first_day + Duration::days(2))
    .bind("Lisbon")
    .bind("Portugal")
    .fetch_one(&mut *conn)
    .await
    .context("inserting conference")?;

    Ok(id)
}

async fn insert_category(
    conn: &mut PgConnection,
    conference_id: Uuid,
    name: &str,
    color: &str,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO categories (conference_id, name, color, creator, modifier)
         VALUES ($1, $2, $3, 'seed', 'seed')
         RETURNING id",
    )
    .bind(conference_id)
    .bind(name)
    .bind(color)
    .fetch_one(&mut *conn)
    .await
    .context("inserting category")?;

    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn insert_section(
    conn: &mut PgConnection,
    conference_id: Uuid,
    category_id: Uuid,
    name: &str,
    room: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO sections (conference_id, category_id, name, room, start_time, end_time, creator, modifier)
         VALUES ($1, $2, $3, $4, $5, $6, 'seed', 'seed')
         RETURNING id",
    )
    .bind(conference_id)
    .bind(category_id)
    .bind(name)
    .bind(room)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(&mut *conn)
    .await
    .context("inserting section")?;

    Ok(id)
}

async fn insert_presenter(
    conn: &mut PgConnection,
    full_name: &str,
    affiliation: &str,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO presenters (full_name, normalized_name, affiliation, creator, modifier)
         VALUES ($1, $2, $3, 'seed', 'seed')
         RETURNING id",
    )
    .bind(full_name)
    .bind(normalize_name(full_name))
    .bind(affiliation)
    .fetch_one(&mut *conn)
    .await
    .context("inserting presenter")?;

    Ok(id)
}

async fn insert_presentation(
    conn: &mut PgConnection,
    conference_id: Uuid,
    title: &str,
) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO presentations (conference_id, title, status, creator, modifier)
         VALUES ($1, $2, 'accepted', 'seed', 'seed')
         RETURNING id",
    )
    .bind(conference_id)
    .bind(title)
    .fetch_one(&mut *conn)
    .await
    .context("inserting presentation")?;

    Ok(id)
}

async fn insert_role(
    conn: &mut PgConnection,
    presentation_id: Uuid,
    presenter_id: Uuid,
    position: i32,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO presenter_roles (presentation_id, presenter_id, position, creator, modifier)
         VALUES ($1, $2, $3, 'seed', 'seed')",
    )
    .bind(presentation_id)
    .bind(presenter_id)
    .bind(position)
    .execute(&mut *conn)
    .await
    .context("inserting presenter role")?;

    Ok(())
}

async fn assign_section(
    conn: &mut PgConnection,
    presentation_id: Uuid,
    section_id: Uuid,
) -> Result<()> {
    sqlx::query("UPDATE presentations SET section_id = $1 WHERE id = $2")
        .bind(section_id)
        .bind(presentation_id)
        .execute(&mut *conn)
        .await
        .context("assigning section")?;

    Ok(())
}

async fn insert_full_day_conflict(
    conn: &mut PgConnection,
    presenter_id: Uuid,
    date: NaiveDate,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO declared_conflicts (presenter_id, kind, date, note, creator, modifier)
         VALUES ($1, 'full_day', $2, 'travel day', 'seed', 'seed')",
    )
    .bind(presenter_id)
    .bind(date)
    .execute(&mut *conn)
    .await
    .context("inserting declared conflict")?;

    Ok(())
}
