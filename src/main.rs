use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tawsyah::{
    models::{CollectionKind, DiscoverQuery, Language, MovieSummary, SortBy, WatchStatus},
    services::{
        browse, search, CatalogProvider, CollectionStore, RecommendationEngine, TmdbProvider,
    },
    storage::FileStorage,
    Config,
};

#[derive(Parser)]
#[command(name = "tawsyah", about = "Discover movies and keep personal lists")]
struct Cli {
    /// Interface language (ar or en); defaults to the configured language
    #[arg(long, global = true)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// This week's trending movies
    Trending,
    /// Trending movies plus the featured genre shelves
    Home,
    /// All movie genres and their ids
    Genres,
    /// Search by title
    Search {
        query: String,
        #[arg(long, default_value = "all")]
        status: WatchStatus,
    },
    /// Browse with filters
    Discover {
        #[arg(long)]
        genre: Option<u64>,
        #[arg(long)]
        year_from: Option<i32>,
        #[arg(long)]
        year_to: Option<i32>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long, default_value = "popularity")]
        sort: SortBy,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "all")]
        status: WatchStatus,
    },
    /// Details and credits for one movie
    Details { id: u64 },
    /// A person's filmography
    Person { id: u64 },
    /// Movies similar to the given one, by id or title
    Recommend {
        movie: String,
        /// Which title match to use as the seed (1-5)
        #[arg(long, default_value_t = 1)]
        pick: usize,
    },
    /// Add or remove a movie from a list
    Toggle { kind: CollectionKind, id: u64 },
    /// Show a list
    List { kind: CollectionKind },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tawsyah=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let language = cli.lang.unwrap_or(config.language);

    let provider: Arc<dyn CatalogProvider> = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);

    let storage = Arc::new(FileStorage::new(config.resolve_data_dir()?));
    let mut collections = CollectionStore::open(storage);

    match cli.command {
        Command::Trending => {
            let movies = browse::trending(provider, language).await?;
            print_movies(&movies, &collections);
        }
        Command::Home => {
            let trending = browse::trending(provider.clone(), language).await?;
            println!("Trending");
            print_movies(&trending, &collections);

            let ids: Vec<u64> = browse::HOME_GENRES.iter().map(|g| g.id).collect();
            let shelves = browse::genre_shelves(provider, &ids, language).await;

            for (genre, shelf) in browse::HOME_GENRES.iter().zip(shelves) {
                println!();
                println!("{} (#{})", genre.label(language), shelf.genre_id);
                print_movies(&shelf.movies, &collections);
            }
        }
        Command::Genres => {
            for genre in provider.genres(language).await? {
                println!("{:>6}  {}", genre.id, genre.name);
            }
        }
        Command::Search { query, status } => {
            let movies =
                search::search_movies(provider, &collections, &query, language, status).await?;
            print_movies(&movies, &collections);
        }
        Command::Discover {
            genre,
            year_from,
            year_to,
            min_rating,
            sort,
            page,
            status,
        } => {
            let query = DiscoverQuery {
                genre,
                year_from,
                year_to,
                min_rating,
                sort_by: sort,
                page,
            };
            let movies =
                search::discover_movies(provider, &collections, &query, language, status).await?;
            print_movies(&movies, &collections);
        }
        Command::Details { id } => {
            let page = browse::movie_page(provider, id, language).await?;
            let details = &page.details;

            println!(
                "{} ({})",
                details.title.as_deref().unwrap_or("Unknown"),
                details.release_date.as_deref().unwrap_or("-")
            );
            if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
                println!("  {}", tagline);
            }
            let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            println!("  Genres: {}", genres.join(", "));
            if let Some(rating) = details.vote_average {
                println!("  Rating: {:.1}", rating);
            }
            if let Some(overview) = &details.overview {
                println!("  {}", overview);
            }
            println!(
                "  Poster: {}",
                tawsyah::services::providers::tmdb::image_url(
                    &config.tmdb_image_url,
                    details.poster_path.as_deref(),
                    "w500"
                )
            );
            if let Some(credits) = page.credits {
                if let Some(director) = credits.director {
                    println!("  Director: {} (#{})", director.name, director.id);
                }
                for actor in credits.actors {
                    match actor.character {
                        Some(character) => {
                            println!("  {} as {} (#{})", actor.name, character, actor.id)
                        }
                        None => println!("  {} (#{})", actor.name, actor.id),
                    }
                }
            }
            for kind in CollectionKind::ALL {
                if collections.is_member(kind, id) {
                    println!("  In {}", kind);
                }
            }
        }
        Command::Person { id } => {
            let filmography = browse::filmography(provider, id, language).await?;
            println!(
                "{} ({} movies)",
                filmography.person.name,
                filmography.movies.len()
            );
            print_movies(&filmography.movies, &collections);
        }
        Command::Recommend { movie, pick } => {
            let id = match movie.trim().parse::<u64>() {
                Ok(id) => id,
                Err(_) => {
                    let candidates =
                        search::seed_candidates(provider.clone(), &movie, language).await?;
                    let seed = pick
                        .checked_sub(1)
                        .and_then(|index| candidates.get(index))
                        .ok_or_else(|| {
                            anyhow::anyhow!("No match #{} for \"{}\"", pick, movie.trim())
                        })?;

                    println!("Matches:");
                    print_movies(&candidates, &collections);
                    println!();
                    println!("Similar to {} (#{})", seed.display_title(), seed.id);
                    seed.id
                }
            };

            let engine = RecommendationEngine::new(provider);
            let movies = engine.recommend(id, language).await;
            if movies.is_empty() {
                println!("No recommendations found");
            }
            print_movies(&movies, &collections);
        }
        Command::Toggle { kind, id } => {
            let movie = browse::summary_for(provider, id, language).await?;
            let title = movie.display_title().to_string();
            if collections.toggle(kind, movie) {
                println!("Added {} to {}", title, kind);
            } else {
                println!("Removed {} from {}", title, kind);
            }
        }
        Command::List { kind } => {
            let movies = collections.collection(kind);
            if movies.is_empty() {
                println!("Your {} is empty", kind);
            } else {
                println!("{} ({} movies)", kind, collections.len(kind));
            }
            print_movies(movies, &collections);
        }
    }

    Ok(())
}

fn print_movies(movies: &[MovieSummary], collections: &CollectionStore) {
    for movie in movies {
        let marks: String = [
            (CollectionKind::Watchlist, '+'),
            (CollectionKind::Favorites, '*'),
            (CollectionKind::Watched, 'v'),
        ]
        .into_iter()
        .map(|(kind, mark)| {
            if collections.is_member(kind, movie.id) {
                mark
            } else {
                ' '
            }
        })
        .collect();

        println!(
            "[{}] {:>8}  {} ({})  pop {:.1}",
            marks,
            movie.id,
            movie.display_title(),
            movie.release_year().unwrap_or("----"),
            movie.popularity_or_zero()
        );
    }
}
