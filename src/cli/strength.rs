use ansi_term::Colour;
use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::Subcommand;
use rand::seq::SliceRandom;

use crate::{store::Vault, utils::clock::Clock};

pub struct StrengthItem {
    pub id: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub attribution: &'static str,
    pub category: &'static str,
}

const QUOTES: &[StrengthItem] = &[
    StrengthItem {
        id: "q1",
        title: "",
        text: "The warrior and the artist live by the same code of necessity, which dictates that the battle must be fought anew every day.",
        attribution: "Steven Pressfield",
        category: "WARRIOR",
    },
    StrengthItem {
        id: "q2",
        title: "",
        text: "You have power over your mind - not outside events. Realize this, and you will find strength.",
        attribution: "Marcus Aurelius",
        category: "MENTAL",
    },
    StrengthItem {
        id: "q3",
        title: "",
        text: "The successful warrior is the average man with laser-like focus.",
        attribution: "Bruce Lee",
        category: "DISCIPLINE",
    },
    StrengthItem {
        id: "q4",
        title: "",
        text: "It is during our darkest moments that we must focus to see the light.",
        attribution: "Aristotle",
        category: "STRENGTH",
    },
    StrengthItem {
        id: "q5",
        title: "",
        text: "The cave you fear to enter holds the treasure you seek.",
        attribution: "Joseph Campbell",
        category: "STRENGTH",
    },
    StrengthItem {
        id: "q6",
        title: "",
        text: "A ship in harbor is safe, but that is not what ships are built for.",
        attribution: "John A. Shedd",
        category: "SUCCESS",
    },
    StrengthItem {
        id: "q7",
        title: "",
        text: "The only impossible journey is the one you never begin.",
        attribution: "Tony Robbins",
        category: "SUCCESS",
    },
    StrengthItem {
        id: "q8",
        title: "",
        text: "Strength does not come from physical capacity. It comes from an indomitable will.",
        attribution: "Mahatma Gandhi",
        category: "STRENGTH",
    },
    StrengthItem {
        id: "q9",
        title: "",
        text: "The man who moves a mountain begins by carrying away small stones.",
        attribution: "Confucius",
        category: "DISCIPLINE",
    },
    StrengthItem {
        id: "q10",
        title: "",
        text: "In the middle of difficulty lies opportunity.",
        attribution: "Albert Einstein",
        category: "MENTAL",
    },
];

const FACTS: &[StrengthItem] = &[
    StrengthItem {
        id: "f1",
        title: "The 2-Minute Rule",
        text: "Research shows that if you can't do something for at least 2 minutes, you can't do it for 2 hours. Start small to build momentum.",
        attribution: "James Clear, Atomic Habits",
        category: "PSYCHOLOGY",
    },
    StrengthItem {
        id: "f2",
        title: "Mental Toughness Peak",
        text: "Studies indicate that men's mental resilience peaks between ages 25-35, making this the optimal time for building discipline systems.",
        attribution: "Journal of Applied Psychology",
        category: "PSYCHOLOGY",
    },
    StrengthItem {
        id: "f3",
        title: "Success Mindset",
        text: "92% of successful entrepreneurs report having a daily routine that includes reflection and goal setting.",
        attribution: "Harvard Business Review",
        category: "SUCCESS",
    },
    StrengthItem {
        id: "f4",
        title: "Physical-Mental Link",
        text: "Just 20 minutes of exercise can boost cognitive function and decision-making ability for up to 12 hours.",
        attribution: "American College of Sports Medicine",
        category: "HEALTH",
    },
    StrengthItem {
        id: "f5",
        title: "Leadership Development",
        text: "Research shows that 80% of leadership skills are developed through challenging experiences, not formal training.",
        attribution: "Center for Creative Leadership",
        category: "LEADERSHIP",
    },
    StrengthItem {
        id: "f6",
        title: "Stress Response",
        text: "Men who practice daily mindfulness show 23% better stress management and 31% improved focus in high-pressure situations.",
        attribution: "Mindfulness Research Journal",
        category: "PSYCHOLOGY",
    },
];

const AFFIRMATIONS: &[StrengthItem] = &[
    StrengthItem {
        id: "a1",
        title: "",
        text: "I am the architect of my own destiny and the commander of my mental battlefield.",
        attribution: "",
        category: "STRENGTH",
    },
    StrengthItem {
        id: "a2",
        title: "",
        text: "Every challenge I face is an opportunity to prove my warrior spirit.",
        attribution: "",
        category: "CONFIDENCE",
    },
    StrengthItem {
        id: "a3",
        title: "",
        text: "My focus is laser-sharp, cutting through distractions like a tactical blade.",
        attribution: "",
        category: "FOCUS",
    },
    StrengthItem {
        id: "a4",
        title: "",
        text: "I embrace discomfort as the forge that strengthens my character.",
        attribution: "",
        category: "GROWTH",
    },
    StrengthItem {
        id: "a5",
        title: "",
        text: "My discipline is my weapon, and consistency is my armor.",
        attribution: "",
        category: "STRENGTH",
    },
    StrengthItem {
        id: "a6",
        title: "",
        text: "I choose courage over comfort in every decision I make.",
        attribution: "",
        category: "CONFIDENCE",
    },
    StrengthItem {
        id: "a7",
        title: "",
        text: "My mind is clear, my purpose is defined, and my action is inevitable.",
        attribution: "",
        category: "FOCUS",
    },
    StrengthItem {
        id: "a8",
        title: "",
        text: "Every setback is intelligence for my next strategic advance.",
        attribution: "",
        category: "GROWTH",
    },
];

#[derive(Subcommand, Debug)]
pub enum StrengthCommand {
    #[command(about = "Show the day's quote, fact and affirmation")]
    Today {
        #[arg(long, help = "Pick at random instead of by date")]
        random: bool,
    },
    #[command(about = "Toggle an item in the favorites list")]
    Favorite {
        #[arg(help = "Item id, e.g. q3, f1 or a7")]
        id: String,
    },
    #[command(about = "List favorited items")]
    Favorites {},
}

pub fn process_strength_command(
    command: StrengthCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    match command {
        StrengthCommand::Today { random } => {
            let favorites = vault.strength_favorites()?;
            let favorited = |item: &StrengthItem| favorites.iter().any(|f| f == item.id);

            let (quote, fact, affirmation) = if random {
                let mut rng = rand::thread_rng();
                (
                    QUOTES.choose(&mut rng).expect("quote list is non-empty"),
                    FACTS.choose(&mut rng).expect("fact list is non-empty"),
                    AFFIRMATIONS
                        .choose(&mut rng)
                        .expect("affirmation list is non-empty"),
                )
            } else {
                let ordinal = clock.today().ordinal() as usize;
                (
                    daily_pick(QUOTES, ordinal),
                    daily_pick(FACTS, ordinal),
                    daily_pick(AFFIRMATIONS, ordinal),
                )
            };

            println!("quote");
            print_item(quote, favorited(quote));
            println!("fact");
            print_item(fact, favorited(fact));
            println!("affirmation");
            print_item(affirmation, favorited(affirmation));
            Ok(())
        }
        StrengthCommand::Favorite { id } => {
            if lookup(&id).is_none() {
                return Err(anyhow!("No strength item with id {id}"));
            }
            if vault.toggle_strength_favorite(&id)? {
                println!("Favorited {id}");
            } else {
                println!("Unfavorited {id}");
            }
            Ok(())
        }
        StrengthCommand::Favorites {} => {
            for id in vault.strength_favorites()? {
                if let Some(item) = lookup(&id) {
                    print_item(item, true);
                }
            }
            Ok(())
        }
    }
}

/// Same item for everyone on a given calendar day, cycling with the day of
/// the year.
fn daily_pick(items: &'static [StrengthItem], ordinal: usize) -> &'static StrengthItem {
    &items[ordinal % items.len()]
}

fn lookup(id: &str) -> Option<&'static StrengthItem> {
    QUOTES
        .iter()
        .chain(FACTS)
        .chain(AFFIRMATIONS)
        .find(|item| item.id == id)
}

fn print_item(item: &StrengthItem, favorited: bool) {
    let marker = if favorited { "[*]" } else { "[ ]" };
    let category = category_colour(item.category).paint(item.category);
    if item.title.is_empty() {
        println!("{marker}\t{}\t{category}\t{}", item.id, item.text);
    } else {
        println!("{marker}\t{}\t{category}\t{}: {}", item.id, item.title, item.text);
    }
    if !item.attribution.is_empty() {
        println!("\t\t\t{}", item.attribution);
    }
}

fn category_colour(category: &str) -> Colour {
    match category {
        "WARRIOR" | "STRENGTH" => Colour::Red,
        "MENTAL" | "PSYCHOLOGY" => Colour::Blue,
        "DISCIPLINE" | "FOCUS" => Colour::Yellow,
        "SUCCESS" | "GROWTH" => Colour::Green,
        "CONFIDENCE" => Colour::Purple,
        _ => Colour::White,
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::{store::Vault, utils::clock::MockClock};

    use super::{
        daily_pick, lookup, process_strength_command, StrengthCommand, AFFIRMATIONS, FACTS, QUOTES,
    };

    #[test]
    fn daily_pick_is_keyed_on_the_day_of_year() {
        assert_eq!(daily_pick(QUOTES, 1).id, "q2");
        // Wraps around each list's own length.
        assert_eq!(daily_pick(QUOTES, 11).id, "q2");
        assert_eq!(daily_pick(FACTS, 7).id, "f2");
        assert_eq!(daily_pick(AFFIRMATIONS, 9).id, "a2");
    }

    #[test]
    fn lookup_spans_all_three_lists() {
        assert_eq!(lookup("q10").map(|i| i.category), Some("MENTAL"));
        assert_eq!(lookup("f4").map(|i| i.title), Some("Physical-Mental Link"));
        assert_eq!(lookup("a8").map(|i| i.category), Some("GROWTH"));
        assert!(lookup("z1").is_none());
    }

    #[test]
    fn favorites_toggle_and_persist() -> Result<()> {
        let dir = tempdir()?;
        let vault = Vault::open(dir.path())?;
        let clock = MockClock::new();

        process_strength_command(
            StrengthCommand::Favorite { id: "q3".into() },
            &vault,
            &clock,
        )?;
        assert_eq!(vault.strength_favorites()?, vec!["q3".to_string()]);

        // A second toggle removes it again.
        process_strength_command(
            StrengthCommand::Favorite { id: "q3".into() },
            &vault,
            &clock,
        )?;
        assert!(vault.strength_favorites()?.is_empty());
        Ok(())
    }

    #[test]
    fn favoriting_an_unknown_id_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let vault = Vault::open(dir.path())?;
        let clock = MockClock::new();

        assert!(process_strength_command(
            StrengthCommand::Favorite { id: "q99".into() },
            &vault,
            &clock,
        )
        .is_err());
        assert!(vault.strength_favorites()?.is_empty());
        Ok(())
    }
}
