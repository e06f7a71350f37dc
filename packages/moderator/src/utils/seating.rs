use crate::models::player::AssignedPlayer;

/// Closest living seats on each side of `index`, skipping the dead.
/// Returns indices into `players`; both sides may be the same seat at a
/// table of two, and `None` when nobody else is alive.
pub fn living_neighbours(players: &[AssignedPlayer], index: usize) -> (Option<usize>, Option<usize>) {
    let len = players.len();
    if len < 2 {
        return (None, None);
    }

    let left = (1..len)
        .map(|step| (index + len - step) % len)
        .find(|&i| players[i].is_alive());
    let right = (1..len)
        .map(|step| (index + step) % len)
        .find(|&i| players[i].is_alive());

    (left, right)
}

/// First seat after `index`, going clockwise, that satisfies `accept`.
pub fn next_clockwise(
    players: &[AssignedPlayer],
    index: usize,
    accept: impl Fn(&AssignedPlayer) -> bool,
) -> Option<usize> {
    let len = players.len();
    (1..len)
        .map(|step| (index + step) % len)
        .find(|&i| accept(&players[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PlayerStatus;
    use crate::models::role::Role;
    use crate::utils::test_setup::game_with_roles;

    #[test]
    fn neighbours_skip_the_dead() {
        let mut game = game_with_roles(&[
            Role::Fox,
            Role::SimpleVillager,
            Role::SimpleWerewolf,
            Role::SimpleVillager,
            Role::Seer,
        ]);
        game.players[1].status = PlayerStatus::Dead;

        assert_eq!(living_neighbours(&game.players, 0), (Some(4), Some(2)));
        assert_eq!(living_neighbours(&game.players, 2), (Some(0), Some(3)));
    }

    #[test]
    fn clockwise_scan_wraps_around() {
        let game = game_with_roles(&[
            Role::SimpleWerewolf,
            Role::SimpleVillager,
            Role::RustyKnight,
        ]);
        let found = next_clockwise(&game.players, 2, |p| p.is_wolf_aligned());
        assert_eq!(found, Some(0));
    }
}
