//! The fixed starter pool squads are drawn from before a match begins.
//!
//! Squad generation happens outside any battle turn, so it samples `rand`
//! directly instead of going through the turn oracle.

use crate::element::Element;
use crate::moves::Move;
use crate::pokemon::Pokemon;
use rand::Rng;

fn normal_moves() -> Vec<Move> {
    vec![
        Move::new("Tackle", Element::Normal, 5, 90),
        Move::new("Scratch", Element::Normal, 5, 90),
    ]
}

fn with_normals(signature: [Move; 2]) -> Vec<Move> {
    let [primary, secondary] = signature;
    let mut moves = vec![primary, secondary];
    moves.extend(normal_moves());
    moves
}

fn grass_moves() -> Vec<Move> {
    with_normals([
        Move::new("Razor Leaf", Element::Grass, 10, 70),
        Move::new("Vine Whip", Element::Grass, 15, 50),
    ])
}

fn water_moves() -> Vec<Move> {
    with_normals([
        Move::new("Water Gun", Element::Water, 10, 70),
        Move::new("Bubble", Element::Water, 15, 50),
    ])
}

fn fire_moves() -> Vec<Move> {
    with_normals([
        Move::new("Ember", Element::Fire, 10, 70),
        Move::new("Fire Spin", Element::Fire, 15, 50),
    ])
}

/// The six starters, each carrying its elemental pair plus the two Normal
/// moves. Move lists are statically non-empty, so construction cannot fail.
pub fn starter_pool() -> Vec<Pokemon> {
    let starter = |name: &str, element: Element, moves: Vec<Move>| {
        Pokemon::new(name, element, moves).expect("starter move lists are non-empty")
    };
    vec![
        starter("Bulbasaur", Element::Grass, grass_moves()),
        starter("Oddish", Element::Grass, grass_moves()),
        starter("Squirtle", Element::Water, water_moves()),
        starter("Psyduck", Element::Water, water_moves()),
        starter("Charmander", Element::Fire, fire_moves()),
        starter("Vulpix", Element::Fire, fire_moves()),
    ]
}

/// One uniformly drawn starter. Duplicates across a squad are allowed.
pub fn random_pokemon() -> Pokemon {
    let mut pool = starter_pool();
    let index = rand::rng().random_range(0..pool.len());
    pool.swap_remove(index)
}

/// A squad of `size` independently drawn starters.
pub fn random_squad(size: usize) -> Vec<Pokemon> {
    (0..size).map(|_| random_pokemon()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_starter_has_four_moves() {
        for starter in starter_pool() {
            assert_eq!(starter.moves.len(), 4, "{}", starter.name);
            assert_eq!(starter.current_hp(), 30);
        }
    }

    #[test]
    fn signature_moves_match_the_starter_element() {
        for starter in starter_pool() {
            if starter.element == Element::Normal {
                continue;
            }
            let signatures: Vec<_> = starter
                .moves
                .iter()
                .filter(|mv| mv.element == starter.element)
                .collect();
            assert_eq!(signatures.len(), 2, "{}", starter.name);
        }
    }

    #[test]
    fn random_squad_has_the_requested_size() {
        assert_eq!(random_squad(3).len(), 3);
        assert!(random_squad(1)[0].moves.len() > 0);
    }

    #[test]
    fn random_pokemon_comes_from_the_pool() {
        let names: Vec<String> = starter_pool().into_iter().map(|p| p.name).collect();
        for _ in 0..20 {
            assert!(names.contains(&random_pokemon().name));
        }
    }
}
