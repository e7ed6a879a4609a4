use super::grid::TrailMap;
use crate::engines::generation::{PrimitiveSet, ProgramNode, ProgramTree};
use crate::error::{EvotrailError, Result};
use crate::types::{Cell, Fitness, Heading};

/// Scores program trees. Implementations must be deterministic for a given
/// program and must not retain state across calls; `evaluate` takes `&self`
/// so a generation's evaluations can run in parallel.
pub trait FitnessOracle: Sync {
    fn evaluate(&self, program: &ProgramTree) -> Result<Fitness>;
}

/// Behaviors the foraging agent understands, bound to primitive ids when
/// the oracle is built.
#[derive(Debug, Clone, Copy)]
enum AgentBehavior {
    IfFoodAhead,
    Sequence,
    MoveForward,
    TurnLeft,
    TurnRight,
}

/// Mutable per-evaluation simulation state. Every primitive execution
/// receives this handle explicitly; nothing outside it may be touched.
#[derive(Debug)]
struct SimState {
    row: usize,
    col: usize,
    heading: Heading,
    moves: usize,
    eaten: usize,
    visited: Vec<bool>,
}

/// The reference fitness oracle: a foraging agent walking a toroidal trail
/// map under a fixed move budget. Fitness is the number of food cells
/// eaten, maximized.
pub struct AntOracle {
    map: TrailMap,
    move_limit: usize,
    behaviors: Vec<AgentBehavior>,
}

impl AntOracle {
    /// The foraging vocabulary on a fresh primitive set.
    pub fn primitive_set() -> Result<PrimitiveSet> {
        let mut set = PrimitiveSet::new();
        set.add_function("if_food_ahead", 2)?;
        set.add_function("prog2", 2)?;
        set.add_function("prog3", 3)?;
        set.add_terminal("move_forward")?;
        set.add_terminal("turn_left")?;
        set.add_terminal("turn_right")?;
        Ok(set)
    }

    /// Build the oracle, binding every primitive in `set` to an agent
    /// behavior. Fails with `UnknownPrimitive` for a name the agent cannot
    /// interpret, so a mismatched vocabulary is caught at setup time.
    pub fn new(set: &PrimitiveSet, map: TrailMap, move_limit: usize) -> Result<Self> {
        if move_limit == 0 {
            return Err(EvotrailError::Configuration(
                "Move limit must be at least 1".to_string(),
            ));
        }

        let mut behaviors = Vec::with_capacity(set.len());
        for (_, primitive) in set.iter() {
            let behavior = match primitive.name.as_str() {
                "if_food_ahead" => AgentBehavior::IfFoodAhead,
                "prog2" | "prog3" => AgentBehavior::Sequence,
                "move_forward" => AgentBehavior::MoveForward,
                "turn_left" => AgentBehavior::TurnLeft,
                "turn_right" => AgentBehavior::TurnRight,
                other => return Err(EvotrailError::UnknownPrimitive(other.to_string())),
            };
            behaviors.push(behavior);
        }

        Ok(Self {
            map,
            move_limit,
            behaviors,
        })
    }

    pub fn map(&self) -> &TrailMap {
        &self.map
    }

    pub fn move_limit(&self) -> usize {
        self.move_limit
    }

    fn fresh_state(&self) -> SimState {
        let (row, col) = self.map.start();
        SimState {
            row,
            col,
            heading: self.map.start_heading(),
            moves: 0,
            eaten: 0,
            visited: vec![false; self.map.cell_count()],
        }
    }

    /// True iff the cell one wrapping step ahead holds food in the original
    /// grid layout; the overlay only tracks consumption, never sensing.
    fn sense_food(&self, state: &SimState) -> bool {
        let (row, col) = self.map.step_from(state.row, state.col, state.heading);
        self.map.cell(row, col) == Cell::Food
    }

    fn move_forward(&self, state: &mut SimState) {
        if state.moves >= self.move_limit {
            return;
        }
        state.moves += 1;

        let (row, col) = self.map.step_from(state.row, state.col, state.heading);
        state.row = row;
        state.col = col;

        let index = self.map.cell_index(row, col);
        if self.map.cell(row, col) == Cell::Food && !state.visited[index] {
            state.eaten += 1;
        }
        state.visited[index] = true;
    }

    fn turn_left(&self, state: &mut SimState) {
        if state.moves >= self.move_limit {
            return;
        }
        state.moves += 1;
        state.heading = state.heading.left();
    }

    fn turn_right(&self, state: &mut SimState) {
        if state.moves >= self.move_limit {
            return;
        }
        state.moves += 1;
        state.heading = state.heading.right();
    }

    fn exec(&self, node: &ProgramNode, state: &mut SimState) {
        match self.behaviors[node.primitive.index()] {
            AgentBehavior::IfFoodAhead => {
                if self.sense_food(state) {
                    self.exec(&node.children[0], state);
                } else {
                    self.exec(&node.children[1], state);
                }
            }
            AgentBehavior::Sequence => {
                for child in &node.children {
                    self.exec(child, state);
                }
            }
            AgentBehavior::MoveForward => self.move_forward(state),
            AgentBehavior::TurnLeft => self.turn_left(state),
            AgentBehavior::TurnRight => self.turn_right(state),
        }
    }
}

impl FitnessOracle for AntOracle {
    fn evaluate(&self, program: &ProgramTree) -> Result<Fitness> {
        let mut state = self.fresh_state();
        while state.moves < self.move_limit {
            let before = state.moves;
            self.exec(&program.root, &mut state);
            if state.moves == before {
                // a pass that consumes no budget would never terminate
                break;
            }
        }
        Ok(Fitness::maximizing(state.eaten as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // straight run of food east of the start, then a gap
    const LINE_MAP: &str = "S###.#..\n\
                            ........\n\
                            ........";

    fn oracle(move_limit: usize) -> AntOracle {
        let set = AntOracle::primitive_set().unwrap();
        let map = TrailMap::parse(LINE_MAP).unwrap();
        AntOracle::new(&set, map, move_limit).unwrap()
    }

    fn leaf_program(name: &str) -> ProgramTree {
        let set = AntOracle::primitive_set().unwrap();
        ProgramTree::new(ProgramNode::leaf(set.id_of(name).unwrap()))
    }

    #[test]
    fn move_forward_eats_along_the_trail() {
        let oracle = oracle(3);
        let fitness = oracle.evaluate(&leaf_program("move_forward")).unwrap();
        assert_eq!(fitness.values(), &[3.0]);
    }

    #[test]
    fn revisited_food_is_not_eaten_twice() {
        // 10 steps on an 8-wide torus revisits columns 1 and 2; the three
        // food cells at columns 1-3 plus the one at column 5 are each
        // counted once
        let oracle = oracle(10);
        let fitness = oracle.evaluate(&leaf_program("move_forward")).unwrap();
        assert_eq!(fitness.values(), &[4.0]);
    }

    #[test]
    fn turning_consumes_budget_without_moving() {
        let oracle = oracle(5);
        let fitness = oracle.evaluate(&leaf_program("turn_left")).unwrap();
        assert_eq!(fitness.values(), &[0.0]);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let oracle = oracle(600);
        let program = leaf_program("move_forward");
        let first = oracle.evaluate(&program).unwrap();
        let second = oracle.evaluate(&program).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_vocabulary_rejected_at_setup() {
        let mut set = PrimitiveSet::new();
        set.add_terminal("self_destruct").unwrap();
        let map = TrailMap::parse(LINE_MAP).unwrap();
        assert!(matches!(
            AntOracle::new(&set, map, 600),
            Err(EvotrailError::UnknownPrimitive(_))
        ));
    }

    #[test]
    fn zero_move_limit_rejected() {
        let set = AntOracle::primitive_set().unwrap();
        let map = TrailMap::parse(LINE_MAP).unwrap();
        assert!(AntOracle::new(&set, map, 0).is_err());
    }

    #[test]
    fn conditional_program_follows_the_trail() {
        // if_food_ahead(move_forward, turn_left): eats the contiguous run,
        // then spins in place once the gap appears
        let set = AntOracle::primitive_set().unwrap();
        let program = ProgramTree::new(ProgramNode::new(
            set.id_of("if_food_ahead").unwrap(),
            vec![
                ProgramNode::leaf(set.id_of("move_forward").unwrap()),
                ProgramNode::leaf(set.id_of("turn_left").unwrap()),
            ],
        ));
        let oracle = oracle(20);
        let fitness = oracle.evaluate(&program).unwrap();
        assert_eq!(fitness.values(), &[3.0]);
    }
}
