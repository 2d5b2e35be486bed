// src/app/movies.rs
use std::collections::{BTreeSet, HashMap};

use crate::app::types::{Character, Movie};

#[derive(Default)]
struct MovieAgg {
    character_idxs: Vec<usize>,
    tv_shows: BTreeSet<String>,
    short_films: BTreeSet<String>,
    park_attractions: BTreeSet<String>,
}

/// Group a flat character list into movies, one per distinct film title.
///
/// Single pass. Output order is the order titles are first encountered;
/// each movie's character list is in first-seen order too. Auxiliary
/// attributes are unioned into sorted, duplicate-free lists. Characters
/// that list no films contribute nothing. Pure function of its input.
pub fn build_movies(characters: &[Character]) -> Vec<Movie> {
    let mut order: Vec<String> = Vec::new();
    let mut by_title: HashMap<String, MovieAgg> = HashMap::new();

    for (idx, ch) in characters.iter().enumerate() {
        for film in &ch.films {
            let agg = by_title.entry(film.clone()).or_insert_with(|| {
                order.push(film.clone());
                MovieAgg::default()
            });
            agg.character_idxs.push(idx);
            agg.tv_shows.extend(ch.tv_shows.iter().cloned());
            agg.short_films.extend(ch.short_films.iter().cloned());
            agg.park_attractions
                .extend(ch.park_attractions.iter().cloned());
        }
    }

    order
        .into_iter()
        .filter_map(|title| {
            by_title.remove(&title).map(|agg| Movie {
                title,
                character_idxs: agg.character_idxs,
                tv_shows: agg.tv_shows.into_iter().collect(),
                short_films: agg.short_films.into_iter().collect(),
                park_attractions: agg.park_attractions.into_iter().collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::build_movies;
    use crate::app::types::Character;

    fn character(name: &str, films: &[&str]) -> Character {
        Character {
            name: name.to_string(),
            films: films.iter().map(|s| s.to_string()).collect(),
            ..Character::default()
        }
    }

    #[test]
    fn groups_characters_by_film_in_first_seen_order() {
        let chars = vec![character("A", &["F1"]), character("B", &["F1", "F2"])];
        let movies = build_movies(&chars);

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "F1");
        assert_eq!(movies[0].character_idxs, vec![0, 1]);
        assert_eq!(movies[1].title, "F2");
        assert_eq!(movies[1].character_idxs, vec![1]);
    }

    #[test]
    fn one_movie_per_distinct_title() {
        let chars = vec![
            character("A", &["F1", "F2"]),
            character("B", &["F2", "F3"]),
            character("C", &["F1"]),
        ];
        let movies = build_movies(&chars);
        assert_eq!(movies.len(), 3);
        let titles: Vec<_> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["F1", "F2", "F3"]);
    }

    #[test]
    fn characters_without_films_contribute_nothing() {
        let chars = vec![character("Loner", &[]), character("A", &["F1"])];
        let movies = build_movies(&chars);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].character_idxs, vec![1]);
    }

    #[test]
    fn auxiliary_lists_are_unioned_without_duplicates() {
        let mut a = character("A", &["F1"]);
        a.tv_shows = vec!["Show".into(), "Other".into()];
        a.park_attractions = vec!["Ride".into()];
        let mut b = character("B", &["F1"]);
        b.tv_shows = vec!["Show".into()];
        b.short_films = vec!["Short".into()];

        let movies = build_movies(&[a, b]);
        assert_eq!(movies[0].tv_shows, vec!["Other", "Show"]);
        assert_eq!(movies[0].short_films, vec!["Short"]);
        assert_eq!(movies[0].park_attractions, vec!["Ride"]);
    }

    #[test]
    fn aux_sets_only_come_from_characters_in_that_film() {
        let mut a = character("A", &["F1"]);
        a.tv_shows = vec!["OnlyF1".into()];
        let mut b = character("B", &["F2"]);
        b.tv_shows = vec!["OnlyF2".into()];

        let movies = build_movies(&[a, b]);
        assert_eq!(movies[0].tv_shows, vec!["OnlyF1"]);
        assert_eq!(movies[1].tv_shows, vec!["OnlyF2"]);
    }

    #[test]
    fn is_deterministic_across_runs() {
        let mut a = character("A", &["F1"]);
        a.tv_shows = vec!["Z".into(), "A".into(), "M".into()];
        let input = vec![a, character("B", &["F1", "F2"])];

        assert_eq!(build_movies(&input), build_movies(&input));
    }

    #[test]
    fn empty_input_yields_no_movies() {
        assert!(build_movies(&[]).is_empty());
    }
}
