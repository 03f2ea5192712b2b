use std::io::{BufRead, Write};

use anyhow::Context;

use armory_core::{AggregateRoot, DomainError, DomainResult, ItemId};
use armory_events::{Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use armory_inventory::{AGGREGATE_TYPE, InventoryEvent, ItemManager};

use crate::config::Config;
use crate::render;
use crate::script::{self, Step};

type Envelope = EventEnvelope<InventoryEvent>;

/// What happened to a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Accepted; carries the number of events it produced (0 for no-ops).
    Applied(usize),
    /// Refused by the manager; state is unchanged.
    Rejected(DomainError),
}

/// Runs steps against one manager and writes everything the user sees to `out`.
#[derive(Debug)]
pub struct Driver<W> {
    manager: ItemManager,
    bus: InMemoryEventBus<Envelope>,
    subscription: Subscription<Envelope>,
    out: W,
    json: bool,
}

impl<W: Write> Driver<W> {
    pub fn new(capacity: usize, json: bool, out: W) -> anyhow::Result<Self> {
        let manager = ItemManager::new(capacity).context("failed to create item manager")?;
        let bus = InMemoryEventBus::new();
        let subscription = bus.subscribe();
        Ok(Self {
            manager,
            bus,
            subscription,
            out,
            json,
        })
    }

    pub fn from_config(config: &Config, out: W) -> anyhow::Result<Self> {
        Self::new(config.capacity, config.json, out)
    }

    pub fn manager(&self) -> &ItemManager {
        &self.manager
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one step, announce its events, then render the collection.
    ///
    /// Domain rejections are reported and returned as [`Outcome::Rejected`];
    /// only output failures are errors.
    pub fn step(&mut self, step: &Step) -> anyhow::Result<Outcome> {
        let version_before = self.manager.version();
        let result = match step {
            Step::Add(item) => self.manager.add(item.clone()),
            Step::Remove { id } => self.manager.remove(*id),
            Step::LevelUp { id } => self.manager.level_up(*id),
            Step::Synthesize { target, ingredient } => {
                self.manager.synthesize(*target, *ingredient)
            }
        };

        let outcome = match result {
            Ok(events) => {
                let count = events.len();
                self.publish(version_before, events);
                Outcome::Applied(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, ?step, "step rejected");
                writeln!(self.out, "rejected: {err}")?;
                Outcome::Rejected(err)
            }
        };

        self.announce()?;
        self.render()?;
        Ok(outcome)
    }

    pub fn run_script(&mut self, steps: &[Step]) -> anyhow::Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(steps.len());
        for step in steps {
            outcomes.push(self.step(step)?);
            writeln!(self.out)?;
        }
        Ok(outcomes)
    }

    /// The classic session: three starter items, then a level-up and a
    /// synthesis chosen by the user. Stops quietly when input runs out.
    pub fn run_interactive<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        let starters = script::starter_items().context("starter items are invalid")?;
        for item in starters {
            self.step(&Step::Add(item))?;
            writeln!(self.out)?;
        }

        let mut lines = input.lines();

        self.prompt("Item id to level up: ")?;
        let Some(line) = lines.next().transpose().context("failed to read input")? else {
            return Ok(());
        };
        match line.parse::<ItemId>() {
            Ok(id) => {
                self.step(&Step::LevelUp { id })?;
            }
            Err(err) => writeln!(self.out, "rejected: {err}")?,
        }
        writeln!(self.out)?;

        self.prompt("Synthesis, target then ingredient (e.g. `2 3`): ")?;
        let Some(line) = lines.next().transpose().context("failed to read input")? else {
            return Ok(());
        };
        match parse_pair(&line) {
            Ok((target, ingredient)) => {
                self.step(&Step::Synthesize { target, ingredient })?;
            }
            Err(err) => writeln!(self.out, "rejected: {err}")?,
        }

        Ok(())
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        if self.json {
            let snapshot = render::json(&self.manager).context("failed to render inventory")?;
            writeln!(self.out, "{snapshot}")?;
        } else {
            write!(self.out, "{}", render::text(&self.manager))?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    fn publish(&mut self, version_before: u64, events: Vec<InventoryEvent>) {
        let envelopes = Envelope::wrap_batch(
            self.manager.id_typed(),
            AGGREGATE_TYPE,
            version_before,
            events,
        );
        for envelope in envelopes {
            tracing::debug!(
                event_type = envelope.payload().event_type(),
                sequence = envelope.sequence_number(),
                "event applied"
            );
            if let Err(err) = self.bus.publish(envelope) {
                tracing::warn!(?err, "failed to publish event");
            }
        }
    }

    fn announce(&mut self) -> std::io::Result<()> {
        for envelope in self.subscription.drain() {
            writeln!(self.out, "{}", render::announce(envelope.payload()))?;
        }
        Ok(())
    }
}

fn parse_pair(line: &str) -> DomainResult<(ItemId, ItemId)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((a.parse()?, b.parse()?)),
        _ => Err(DomainError::invalid_id(format!(
            "expected two ids separated by a space, got {line:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_inventory::{Item, Rank};

    fn driver(capacity: usize) -> Driver<Vec<u8>> {
        Driver::new(capacity, false, Vec::new()).unwrap()
    }

    fn output(driver: Driver<Vec<u8>>) -> String {
        String::from_utf8(driver.into_output()).unwrap()
    }

    #[test]
    fn parse_pair_accepts_exactly_two_ids() {
        assert_eq!(
            parse_pair(" 2  3 ").unwrap(),
            (ItemId::new(2), ItemId::new(3))
        );
        assert!(parse_pair("2").is_err());
        assert!(parse_pair("2 3 4").is_err());
        assert!(parse_pair("two 3").is_err());
    }

    #[test]
    fn accepted_step_is_announced_then_rendered() {
        let mut driver = driver(2);
        let item = Item::weapon(1, "Dagger", 1, Rank::A, 10).unwrap();

        let outcome = driver.step(&Step::Add(item)).unwrap();

        assert_eq!(outcome, Outcome::Applied(1));
        assert_eq!(
            output(driver),
            "[ item added ]\n\
             1, Name : Dagger, Level : 1, Rank : A, Power : 10\n\
             Inventory (1/2)\n\
             1, Name : Dagger, Level : 1, Rank : A, Power : 10\n"
        );
    }

    #[test]
    fn rejection_is_reported_and_session_continues() {
        let mut driver = driver(1);
        driver
            .step(&Step::Add(Item::ring(1, "Band", 0, Rank::C, 1).unwrap()))
            .unwrap();

        let outcome = driver
            .step(&Step::Add(Item::ring(2, "Spare", 0, Rank::C, 1).unwrap()))
            .unwrap();
        assert_eq!(outcome, Outcome::Rejected(DomainError::CapacityExceeded { capacity: 1 }));

        let outcome = driver.step(&Step::Remove { id: ItemId::new(1) }).unwrap();
        assert_eq!(outcome, Outcome::Applied(1));
        assert!(driver.manager().is_empty());

        let text = output(driver);
        assert!(text.contains("rejected: capacity exceeded"));
        assert!(text.contains("[ item removed ] 1"));
    }

    #[test]
    fn interactive_session_with_garbage_input_still_renders() {
        let mut driver = driver(8);
        driver
            .run_interactive("abc\n2 2\n".as_bytes())
            .unwrap();

        assert_eq!(
            driver.manager().ids(),
            vec![ItemId::new(1), ItemId::new(2), ItemId::new(3)]
        );
        let text = output(driver);
        assert!(text.contains("rejected: invalid identifier: ItemId"));
        assert!(text.contains("cannot be synthesized with itself"));
    }

    #[test]
    fn interactive_synthesis_of_one_and_two_succeeds() {
        let mut driver = driver(8);
        driver.run_interactive("3\n1 2\n".as_bytes()).unwrap();

        assert_eq!(driver.manager().ids(), vec![ItemId::new(3), ItemId::new(3)]);
        let text = output(driver);
        assert!(text.contains("[ synthesis ] 1 + 2 -> 3 (rank S)"));
        assert!(!text.contains("rejected"));
    }

    #[test]
    fn interactive_session_stops_at_end_of_input() {
        let mut driver = driver(8);
        driver.run_interactive("1\n".as_bytes()).unwrap();

        assert_eq!(driver.manager().get(ItemId::new(1)).unwrap().level().value(), 2);
        assert_eq!(driver.manager().len(), 3);
    }
}
