use enum_map::{Enum, EnumMap, enum_map};
use lazy_static::lazy_static;
use strum::{EnumIter, IntoEnumIterator};


#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Enum, EnumIter, strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    King,
    Knight,
    Bandit,
    Assassin,
    Usurper,
}

// What a player sees when their role is revealed to them.
#[derive(Clone, Debug)]
pub struct RoleDefinition {
    pub title: &'static str,
    pub description: &'static str,
    pub color: u32, // 0xRRGGBB
    pub thumbnail: &'static str,
}

lazy_static! {
    static ref ROLE_DEFINITIONS: EnumMap<Role, RoleDefinition> = enum_map! {
        Role::King => RoleDefinition {
            title: "King",
            description: concat!(
                "You are the king! Your life total starts at 50, you begin the game, ",
                "and you win if you, or you and the knight, are the last members standing",
            ),
            color: 0xEEEEEE,
            thumbnail: "https://static.thenounproject.com/png/382020-200.png",
        },
        Role::Knight => RoleDefinition {
            title: "Knight",
            description: concat!(
                "You are the knight! Your sole objective is protecting the King. ",
                "If the King wins, you win, even if you are dead",
            ),
            color: 0x00FF00,
            thumbnail: "https://static.thenounproject.com/png/440140-200.png",
        },
        Role::Bandit => RoleDefinition {
            title: "Bandit",
            description: "You are a bandit! If the king dies, and it was not because of the usurper, you win!",
            color: 0xFF0000,
            thumbnail: "https://static.thenounproject.com/png/79853-200.png",
        },
        Role::Assassin => RoleDefinition {
            title: "Assassin",
            description: concat!(
                "You are the assassin! You want the king dead, but you know that you are too weak ",
                "to take the crown for yourself while the Bandits are still alive. ",
                "Make sure the Bandits are dead, then kill the King and win!",
            ),
            color: 0x000000,
            thumbnail: "https://static.thenounproject.com/png/1214-200.png",
        },
        Role::Usurper => RoleDefinition {
            title: "Usurper",
            description: concat!(
                "You are the usurper! If the king dies by your hand, you become the new king, ",
                "your life total goes to 50 (if it was lower than 50), ",
                "and you now win if you and the knight are the last ones standing",
            ),
            color: 0x0000FF,
            thumbnail: "https://steemitimages.com/DQmZDnnuhnc67zBNVurMhGY9xa3abVHTwanhDTvZSw6Wni6/84490-200.png",
        },
    };
}

impl Role {
    pub fn definition(self) -> &'static RoleDefinition { &ROLE_DEFINITIONS[self] }

    // Short reminder of the win condition, as shown in the rules summary.
    pub fn goal(self) -> &'static str {
        match self {
            Role::King => concat!(
                "One king. Starts at 50 life. Goes first. Wins when only himself or himself ",
                "and the knight are the last players alive *(PLAINS/WHITE)*",
            ),
            Role::Knight => concat!(
                "One knight. Wins when the king wins. If the Knight dies but the King still wins, ",
                "the knight wins. *(FOREST/GREEN)*",
            ),
            Role::Bandit => concat!(
                "Two bandits. If the king dies while a bandit is alive (and not due to the usurper), ",
                "the bandits win. *(MOUNTAIN/RED)*",
            ),
            Role::Assassin => concat!(
                "One assassin. Wins when the king dies, if all bandits are dead (not due to the ",
                "usurper). This role often looks like a knight, because he wants the bandits dead. ",
                "*(SWAMP/BLACK)*",
            ),
            Role::Usurper => concat!(
                "One usurper. If the usurper kills the king, he becomes the king, his life total ",
                "goes to 50, and he now wins the way kings win. This role often looks like a ",
                "bandit, because he wants the bandits to let him land the killing blow. ",
                "*(ISLAND/BLUE)*",
            ),
        }
    }

    pub fn all() -> impl Iterator<Item = Role> { Role::iter() }
}
