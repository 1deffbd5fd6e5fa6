//! Category word lists
//!
//! The state machine only asks for "a random category" and "a random word in
//! this category". Lists are either the built-in set below or a JSON file of the
//! form `{ "Category": ["word", ...] }` loaded once at startup.

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read word file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse word file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Word catalog has no categories")]
    Empty,

    #[error("Category {0:?} has no words")]
    EmptyCategory(String),
}

/// Immutable mapping from category name to candidate words
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<(String, Vec<String>)>,
}

impl Catalog {
    /// Build a catalog, rejecting empty catalogs and empty categories
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some((name, _)) = categories.iter().find(|(_, words)| words.is_empty()) {
            return Err(CatalogError::EmptyCategory(name.clone()));
        }
        Ok(Self { categories })
    }

    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN
                .iter()
                .map(|(name, words)| {
                    (
                        name.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::new(map.into_iter().collect())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.words(category).is_some()
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, words)| words.as_slice())
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Uniformly random category name
    pub fn random_category<R: Rng>(&self, rng: &mut R) -> &str {
        let index = rng.random_range(0..self.categories.len());
        &self.categories[index].0
    }

    /// Uniformly random word of `category`, `None` if the category is unknown
    pub fn random_word<R: Rng>(&self, category: &str, rng: &mut R) -> Option<&str> {
        self.words(category)?.choose(rng).map(String::as_str)
    }
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Food",
        &[
            "Pizza", "Sushi", "Burger", "Pasta", "Ice Cream", "Tacos", "Sandwich", "Salad",
            "Steak", "Ramen", "Dumplings", "Curry", "Fried Chicken", "Hot Dog", "Burrito",
            "Pho", "Lobster", "Mac and Cheese", "Nachos", "Pancakes", "Waffles",
            "French Fries", "Cheesecake", "Donuts", "Lasagna", "Falafel", "Paella", "Croissant",
            "Pretzel", "Churros", "Tiramisu", "Hummus", "Guacamole", "Pad Thai", "Poutine",
        ],
    ),
    (
        "Animal",
        &[
            "Elephant", "Tiger", "Dolphin", "Kangaroo", "Penguin", "Giraffe", "Lion", "Panda",
            "Cheetah", "Wolf", "Fox", "Polar Bear", "Koala", "Zebra", "Hippopotamus",
            "Crocodile", "Turtle", "Chameleon", "Eagle", "Owl", "Flamingo", "Parrot", "Camel",
            "Llama", "Hedgehog", "Sloth", "Raccoon", "Otter", "Gorilla", "Octopus", "Shark",
            "Jellyfish", "Seahorse", "Platypus", "Narwhal",
        ],
    ),
    (
        "Country",
        &[
            "Canada", "Brazil", "France", "Japan", "Australia", "India", "Mexico", "Italy",
            "Germany", "China", "Spain", "South Korea", "Egypt", "Sweden", "Norway",
            "Switzerland", "Thailand", "Vietnam", "New Zealand", "Chile", "Cuba", "Jamaica",
            "Nigeria", "Madagascar", "Mongolia", "Nepal", "Iceland", "Fiji", "Portugal",
            "Greece",
        ],
    ),
    (
        "Sport",
        &[
            "Soccer", "Basketball", "Tennis", "Cricket", "Baseball", "Hockey", "Rugby", "Golf",
            "Volleyball", "Table Tennis", "Badminton", "Swimming", "Gymnastics", "Boxing",
            "Judo", "Fencing", "Archery", "Bowling", "Darts", "Surfing", "Sailing", "Cycling",
            "Skateboarding", "Skiing", "Curling", "Marathon", "Pole Vault", "Dodgeball",
            "Pickleball", "Water Polo",
        ],
    ),
    (
        "Game",
        &[
            "Chess", "Monopoly", "Scrabble", "Poker", "Checkers", "Risk", "Clue", "Battleship",
            "Uno", "Jenga", "Catan", "Backgammon", "Dominoes", "Mahjong", "Pictionary",
            "Twister", "Yahtzee",
        ],
    ),
    (
        "Video Game",
        &[
            "Minecraft", "Fortnite", "Roblox", "Tetris", "Pac-Man", "Super Mario Bros.",
            "The Legend of Zelda", "Elden Ring", "Overwatch", "League of Legends", "Among Us",
            "Terraria", "Portal", "Animal Crossing", "Stardew Valley", "Pokemon", "Halo",
            "Street Fighter", "Rocket League", "Fall Guys",
        ],
    ),
    (
        "Person",
        &[
            "Albert Einstein", "Elvis Presley", "Marilyn Monroe", "Michael Jackson",
            "Leonardo da Vinci", "Nikola Tesla", "William Shakespeare", "Walt Disney",
            "Nelson Mandela", "Pablo Picasso", "Frida Kahlo", "Charles Darwin", "Bruce Lee",
            "Vincent van Gogh", "Freddie Mercury", "Marie Curie", "Cleopatra", "Mozart",
            "Napoleon", "Amelia Earhart",
        ],
    ),
    (
        "Characters",
        &[
            "Homer Simpson", "Bart Simpson", "Charlie Brown", "Snoopy", "Bugs Bunny",
            "Daffy Duck", "Scooby-Doo", "SpongeBob SquarePants", "Patrick Star",
            "Mickey Mouse", "Optimus Prime", "Goku", "Naruto Uzumaki", "Pikachu",
            "Sailor Moon", "Shrek", "Darth Vader", "Sherlock Holmes", "Harry Potter",
            "Winnie the Pooh",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_is_well_formed() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        for name in catalog.category_names() {
            assert!(!catalog.words(name).unwrap().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_random_word_comes_from_category() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let category = catalog.random_category(&mut rng).to_string();
            let word = catalog.random_word(&category, &mut rng).unwrap();
            assert!(catalog.words(&category).unwrap().iter().any(|w| w == word));
        }
    }

    #[test]
    fn test_unknown_category_has_no_word() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(!catalog.contains("Spaceships"));
        assert!(catalog.random_word("Spaceships", &mut rng).is_none());
    }

    #[test]
    fn test_category_lookup_is_case_sensitive() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains("Food"));
        assert!(!catalog.contains("food"));
    }

    #[test]
    fn test_rejects_empty_catalog_and_categories() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::from_json_str(r#"{"Food":["Pizza"],"Empty":[]}"#),
            Err(CatalogError::EmptyCategory(name)) if name == "Empty"
        ));
        assert!(matches!(
            Catalog::from_json_str("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Fruit":["Apple","Pear"],"Tools":["Hammer"]}}"#).unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.words("Tools").unwrap().to_vec(), vec!["Hammer"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Catalog::from_file("/definitely/not/here/words.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
