// Role dealing. This is the only place that decides who gets which role; everything else just
// delivers the result.

use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::KingdomsError;
use crate::role::Role;


const FIVE_PLAYER_ROLES: [Role; 4] = [Role::Knight, Role::Bandit, Role::Bandit, Role::Assassin];
const SIX_PLAYER_ROLES: [Role; 5] =
    [Role::Knight, Role::Bandit, Role::Bandit, Role::Assassin, Role::Usurper];

// Roles for everybody except the King, given how many such players there are.
pub fn non_king_roles(pool_size: usize) -> Result<&'static [Role], KingdomsError> {
    match pool_size {
        4 => Ok(&FIVE_PLAYER_ROLES),
        5 => Ok(&SIX_PLAYER_ROLES),
        _ => Err(KingdomsError::InvalidPlayerCount(pool_size + 1)),
    }
}

// All roles dealt in a game of `num_players`, King included.
pub fn roles_in_play(num_players: usize) -> Result<Vec<Role>, KingdomsError> {
    let pool_size = num_players.checked_sub(1).ok_or(KingdomsError::InvalidPlayerCount(0))?;
    let mut roles = vec![Role::King];
    roles.extend_from_slice(non_king_roles(pool_size)?);
    Ok(roles)
}

// Players in the order they were listed, together with their roles.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RoleAssignment<P> {
    entries: Vec<(P, Role)>,
}

impl<P> RoleAssignment<P> {
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (&P, Role)> {
        self.entries.iter().map(|(p, role)| (p, *role))
    }
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.entries.iter().map(|(_, role)| *role)
    }

    pub fn king(&self) -> &P {
        // Guaranteed by `assign_roles`: the only constructor.
        self.iter()
            .find(|(_, role)| *role == Role::King)
            .map(|(p, _)| p)
            .unwrap_or_else(|| panic!("Role assignment without a King"))
    }
}

impl<P: PartialEq> RoleAssignment<P> {
    pub fn role_of(&self, participant: &P) -> Option<Role> {
        self.iter().find(|(p, _)| *p == participant).map(|(_, role)| role)
    }
}

// Deals roles to `participants`. Only `participants[..king_eligible_boundary]` can become
// King; `None` means anybody can.
//
// Either succeeds completely or returns an error without consuming any randomness.
pub fn assign_roles<P: Clone + Eq + Hash + fmt::Display>(
    participants: &[P], king_eligible_boundary: Option<usize>, rng: &mut impl Rng,
) -> Result<RoleAssignment<P>, KingdomsError> {
    let num_eligible = king_eligible_boundary.map_or(participants.len(), |boundary| {
        boundary.min(participants.len())
    });
    let pool_size = participants.len().saturating_sub(1);
    let non_king_roles = non_king_roles(pool_size)
        .map_err(|_| KingdomsError::InvalidPlayerCount(participants.len()))?;
    let duplicates = participants.iter().duplicates().map(|p| p.to_string()).collect_vec();
    if !duplicates.is_empty() {
        return Err(KingdomsError::DuplicatePlayers(duplicates));
    }
    if num_eligible == 0 {
        return Err(KingdomsError::NoEligibleKing);
    }

    let king_index = rng.random_range(0..num_eligible);
    let mut roles = non_king_roles.to_vec();
    roles.shuffle(rng);

    // The pool is everybody but the King, eligible first. Its order doesn't matter since the
    // roles are shuffled, so walking the original list and skipping the King is enough.
    let mut pool_roles = roles.into_iter();
    let entries = participants
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let role = if index == king_index {
                Role::King
            } else {
                pool_roles.next().unwrap_or_else(|| panic!("Not enough roles for the pool"))
            };
            (p.clone(), role)
        })
        .collect();
    Ok(RoleAssignment { entries })
}

// A new game in terms of two explicit lists rather than a separator position.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameRequest<P> {
    pub eligible: Vec<P>,
    pub excluded: Vec<P>,
}

impl<P: Clone + Eq + Hash + fmt::Display> GameRequest<P> {
    pub fn num_players(&self) -> usize { self.eligible.len() + self.excluded.len() }

    pub fn participants(&self) -> impl Iterator<Item = &P> {
        self.eligible.iter().chain(self.excluded.iter())
    }

    pub fn assign_roles(&self, rng: &mut impl Rng) -> Result<RoleAssignment<P>, KingdomsError> {
        let participants: Vec<P> = self.participants().cloned().collect();
        assign_roles(&participants, Some(self.eligible.len()), rng)
    }
}
