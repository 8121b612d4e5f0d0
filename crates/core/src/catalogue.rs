//! The fixed list of design patterns the app teaches.

use std::collections::HashSet;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{ParseCategoryError, Pattern, PatternCategory, PatternDraft, PatternId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogueError {
    #[error("duplicate pattern id in catalogue: {0}")]
    DuplicateId(PatternId),
}

/// Which slice of the catalogue to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PatternCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, pattern: &Pattern) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => pattern.category() == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Read-only, ordered collection of patterns keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    patterns: Vec<Pattern>,
}

impl Catalogue {
    /// Build a catalogue from externally supplied patterns.
    ///
    /// # Errors
    ///
    /// Returns `CatalogueError::DuplicateId` if two patterns share an id.
    pub fn from_patterns(patterns: Vec<Pattern>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for pattern in &patterns {
            if !seen.insert(pattern.id()) {
                return Err(CatalogueError::DuplicateId(pattern.id()));
            }
        }
        Ok(Self { patterns })
    }

    /// The 23 classic patterns shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = BUILTIN
            .iter()
            .filter_map(|entry| entry.to_draft().validate().ok())
            .collect();
        Self { patterns }
    }

    #[must_use]
    pub fn all(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns matching the filter, in catalogue order.
    #[must_use]
    pub fn filter(&self, filter: CategoryFilter) -> Vec<&Pattern> {
        self.patterns.iter().filter(|p| filter.matches(p)).collect()
    }

    #[must_use]
    pub fn count_in(&self, category: PatternCategory) -> usize {
        self.patterns
            .iter()
            .filter(|p| p.category() == category)
            .count()
    }
}

struct Entry {
    id: u64,
    title: &'static str,
    category: PatternCategory,
    description: &'static str,
    pros_cons: &'static str,
    task: &'static str,
    result: &'static str,
    code: &'static str,
}

impl Entry {
    fn to_draft(&self) -> PatternDraft {
        let mut draft = PatternDraft::new(PatternId::new(self.id), self.title, self.category);
        draft.description = self.description.to_string();
        draft.pros_cons = self.pros_cons.to_string();
        draft.task = self.task.to_string();
        draft.result = self.result.to_string();
        draft.code = self.code.to_string();
        draft
    }
}

use PatternCategory::{Behavioral, Creational, Structural};

const BUILTIN: &[Entry] = &[
    Entry {
        id: 1,
        title: "Abstract factory",
        category: Creational,
        description: "Provides an interface for creating families of related objects without naming their concrete classes. Each concrete factory produces one consistent family.",
        pros_cons: "Pros: products from one factory are guaranteed to fit together; client code depends only on interfaces.\nCons: adding a new kind of product means changing every factory.",
        task: "Model coffee recipes: a factory per recipe creates the matching drink without the caller knowing the drink type.",
        result: "Families of related drinks are created through one interface, so switching recipe touches a single line.",
        code: "trait Coffee { fn make(&self) -> String; }\ntrait CoffeeRecipe { fn create(&self) -> Box<dyn Coffee>; }\n\nstruct Espresso;\nimpl Coffee for Espresso { fn make(&self) -> String { \"Espresso\".into() } }\n\nstruct EspressoRecipe;\nimpl CoffeeRecipe for EspressoRecipe {\n    fn create(&self) -> Box<dyn Coffee> { Box::new(Espresso) }\n}\n",
    },
    Entry {
        id: 2,
        title: "Builder",
        category: Creational,
        description: "Constructs a complex object step by step, letting the same construction code produce different representations.",
        pros_cons: "Pros: step-by-step construction; reuse of construction code; complex setup isolated from business logic.\nCons: more types to maintain; one builder per product variant.",
        task: "Assemble cars with optional seats, engine, trip computer and GPS through a single builder.",
        result: "Construction is separated from representation, so one process yields many car configurations.",
        code: "#[derive(Default)]\nstruct Car { seats: u8, gps: bool }\n\nstruct CarBuilder { car: Car }\nimpl CarBuilder {\n    fn seats(mut self, n: u8) -> Self { self.car.seats = n; self }\n    fn gps(mut self) -> Self { self.car.gps = true; self }\n    fn build(self) -> Car { self.car }\n}\n",
    },
    Entry {
        id: 3,
        title: "Factory method",
        category: Creational,
        description: "Defines a method for creating an object and lets implementers decide which concrete type to instantiate.",
        pros_cons: "Pros: creator and product are loosely coupled; new products without touching client code.\nCons: may require a parallel hierarchy of creators.",
        task: "Let each logistics mode create its own transport: trucks for roads, ships for sea.",
        result: "Client code plans deliveries against the transport interface and never constructs vehicles directly.",
        code: "trait Transport { fn deliver(&self) -> &'static str; }\ntrait Logistics {\n    fn create_transport(&self) -> Box<dyn Transport>;\n    fn plan(&self) -> &'static str { self.create_transport().deliver() }\n}\n",
    },
    Entry {
        id: 4,
        title: "Prototype",
        category: Creational,
        description: "Creates new objects by copying an existing instance instead of building from scratch.",
        pros_cons: "Pros: clone preconfigured objects cheaply; avoid repeated initialization.\nCons: deep copies of objects with shared references can be tricky.",
        task: "Produce many shapes by cloning a configured prototype and adjusting its position.",
        result: "New shapes inherit the prototype's configuration without re-running setup.",
        code: "#[derive(Clone)]\nstruct Shape { color: String, x: i32 }\n\nlet base = Shape { color: \"red\".into(), x: 0 };\nlet moved = Shape { x: 10, ..base.clone() };\n",
    },
    Entry {
        id: 5,
        title: "Singleton",
        category: Creational,
        description: "Ensures a type has exactly one instance and provides a global access point to it.",
        pros_cons: "Pros: single shared instance; lazy initialization.\nCons: hidden global state; harder to test; couples callers to the instance.",
        task: "Share one configuration object across the application.",
        result: "Every caller reads the same lazily created configuration.",
        code: "use std::sync::OnceLock;\n\nstatic CONFIG: OnceLock<Config> = OnceLock::new();\nfn config() -> &'static Config { CONFIG.get_or_init(Config::load) }\n",
    },
    Entry {
        id: 6,
        title: "Adapter",
        category: Structural,
        description: "Converts the interface of one type into another interface clients expect, so incompatible types can work together.",
        pros_cons: "Pros: reuse existing code without modifying it; single responsibility for conversion.\nCons: extra indirection and types.",
        task: "Plug a legacy XML stock feed into an analytics library that only accepts JSON.",
        result: "The adapter translates the feed so the library consumes it unchanged.",
        code: "trait JsonSource { fn json(&self) -> String; }\nstruct XmlFeed;\nstruct XmlToJson(XmlFeed);\nimpl JsonSource for XmlToJson {\n    fn json(&self) -> String { convert(&self.0) }\n}\n",
    },
    Entry {
        id: 7,
        title: "Bridge",
        category: Structural,
        description: "Splits an abstraction from its implementation so the two can vary independently.",
        pros_cons: "Pros: abstraction and implementation evolve separately; avoids a combinatorial class explosion.\nCons: more complex design for simple cases.",
        task: "Build remotes that can drive any device, so new remotes and new devices are added independently.",
        result: "Remotes hold a device reference and forward calls, so every remote works with every device.",
        code: "trait Device { fn toggle_power(&mut self); }\nstruct Remote<D: Device> { device: D }\nimpl<D: Device> Remote<D> {\n    fn power(&mut self) { self.device.toggle_power(); }\n}\n",
    },
    Entry {
        id: 8,
        title: "Composite",
        category: Structural,
        description: "Composes objects into tree structures and lets clients treat single objects and compositions uniformly.",
        pros_cons: "Pros: uniform handling of leaves and branches; easy to add new node kinds.\nCons: a common interface can become overly general.",
        task: "Compute the total price of an order made of products and nested boxes.",
        result: "Boxes and products share one price method, so totals recurse naturally.",
        code: "enum Item { Product(u32), Boxed(Vec<Item>) }\nfn price(item: &Item) -> u32 {\n    match item {\n        Item::Product(p) => *p,\n        Item::Boxed(items) => items.iter().map(price).sum(),\n    }\n}\n",
    },
    Entry {
        id: 9,
        title: "Decorator",
        category: Structural,
        description: "Attaches new behaviour to an object by wrapping it in objects that share its interface.",
        pros_cons: "Pros: extend behaviour without subclassing; combine behaviours at runtime.\nCons: many small wrappers; order of wrapping matters.",
        task: "Add milk and sugar options to a coffee without a type for every combination.",
        result: "Each wrapper adds cost and description on top of the wrapped coffee.",
        code: "trait Coffee { fn cost(&self) -> u32; }\nstruct Milk<C: Coffee>(C);\nimpl<C: Coffee> Coffee for Milk<C> {\n    fn cost(&self) -> u32 { self.0.cost() + 20 }\n}\n",
    },
    Entry {
        id: 10,
        title: "Facade",
        category: Structural,
        description: "Provides a simplified interface to a complex subsystem.",
        pros_cons: "Pros: isolates clients from subsystem complexity.\nCons: the facade can grow into a god object.",
        task: "Offer a single call that converts a video, hiding codecs, buffers and mixers.",
        result: "Clients call one method while the facade coordinates the subsystem.",
        code: "struct VideoConverter;\nimpl VideoConverter {\n    fn convert(&self, file: &str, format: &str) -> Vec<u8> {\n        let codec = Codec::detect(file);\n        Mixer::encode(codec.decode(file), format)\n    }\n}\n",
    },
    Entry {
        id: 11,
        title: "Flyweight",
        category: Structural,
        description: "Shares common state between many fine-grained objects to save memory.",
        pros_cons: "Pros: large memory savings when objects repeat state.\nCons: code complexity; trades memory for lookup time.",
        task: "Render a forest of millions of trees that share a handful of tree types.",
        result: "Each tree stores only its position and a reference to a shared type.",
        code: "use std::rc::Rc;\nstruct TreeType { name: String, texture: Vec<u8> }\nstruct Tree { x: i32, y: i32, kind: Rc<TreeType> }\n",
    },
    Entry {
        id: 12,
        title: "Proxy",
        category: Structural,
        description: "Provides a substitute for another object to control access to it.",
        pros_cons: "Pros: lazy loading, caching or access control without changing the real object.\nCons: added latency and indirection.",
        task: "Cache responses from a slow video service behind the same interface.",
        result: "Repeated requests are answered from the cache; the service is hit once.",
        code: "trait Videos { fn get(&mut self, id: u32) -> String; }\nstruct Cached<V: Videos> { inner: V, cache: HashMap<u32, String> }\nimpl<V: Videos> Videos for Cached<V> {\n    fn get(&mut self, id: u32) -> String {\n        self.cache.entry(id).or_insert_with(|| self.inner.get(id)).clone()\n    }\n}\n",
    },
    Entry {
        id: 13,
        title: "Chain of responsibility",
        category: Behavioral,
        description: "Passes a request along a chain of handlers; each handler either processes it or forwards it.",
        pros_cons: "Pros: reduces coupling between sender and handlers; single responsibility per handler; open for new handlers.\nCons: a request may go unhandled.",
        task: "Route support tickets through bot, operator and engineer handlers.",
        result: "Each ticket stops at the first handler able to resolve it.",
        code: "trait Handler { fn handle(&self, req: &str) -> Option<String>; }\nfn dispatch(chain: &[Box<dyn Handler>], req: &str) -> Option<String> {\n    chain.iter().find_map(|h| h.handle(req))\n}\n",
    },
    Entry {
        id: 14,
        title: "Command",
        category: Behavioral,
        description: "Turns a request into a standalone object, enabling queuing, logging and undo.",
        pros_cons: "Pros: decouples invoker and receiver; supports undo/redo and deferred execution.\nCons: a new type for every action.",
        task: "Implement editor actions with undo history.",
        result: "Actions are objects on a stack, so undo pops and reverses them.",
        code: "trait Command { fn execute(&mut self, doc: &mut String); fn undo(&mut self, doc: &mut String); }\nstruct History { done: Vec<Box<dyn Command>> }\n",
    },
    Entry {
        id: 15,
        title: "Interpreter",
        category: Behavioral,
        description: "Defines a grammar representation and an interpreter that evaluates sentences in that grammar.",
        pros_cons: "Pros: easy to extend a small language.\nCons: complex grammars become hard to maintain.",
        task: "Evaluate arithmetic expressions built from numbers, sums and products.",
        result: "The expression tree evaluates itself recursively.",
        code: "enum Expr { Num(i64), Add(Box<Expr>, Box<Expr>), Mul(Box<Expr>, Box<Expr>) }\nfn eval(e: &Expr) -> i64 {\n    match e {\n        Expr::Num(n) => *n,\n        Expr::Add(a, b) => eval(a) + eval(b),\n        Expr::Mul(a, b) => eval(a) * eval(b),\n    }\n}\n",
    },
    Entry {
        id: 16,
        title: "Iterator",
        category: Behavioral,
        description: "Traverses the elements of a collection without exposing its underlying representation.",
        pros_cons: "Pros: uniform traversal; several traversals can run at once.\nCons: overkill for trivial collections.",
        task: "Walk a social network's friends list lazily.",
        result: "Callers consume profiles one at a time through a standard iterator.",
        code: "struct Friends { ids: Vec<u32>, pos: usize }\nimpl Iterator for Friends {\n    type Item = u32;\n    fn next(&mut self) -> Option<u32> {\n        let id = self.ids.get(self.pos).copied();\n        self.pos += 1;\n        id\n    }\n}\n",
    },
    Entry {
        id: 17,
        title: "Mediator",
        category: Behavioral,
        description: "Reduces chaotic dependencies between objects by routing their communication through a mediator.",
        pros_cons: "Pros: components stay decoupled; interaction logic lives in one place.\nCons: the mediator can become a god object.",
        task: "Coordinate form widgets so toggling a checkbox enables a text field.",
        result: "Widgets notify the dialog mediator instead of referencing each other.",
        code: "trait Mediator { fn notify(&mut self, sender: &str, event: &str); }\nstruct Dialog { name_enabled: bool }\nimpl Mediator for Dialog {\n    fn notify(&mut self, sender: &str, _event: &str) {\n        if sender == \"checkbox\" { self.name_enabled = !self.name_enabled; }\n    }\n}\n",
    },
    Entry {
        id: 18,
        title: "Memento",
        category: Behavioral,
        description: "Saves and restores an object's previous state without revealing its internals.",
        pros_cons: "Pros: snapshots without breaking encapsulation.\nCons: memory cost of frequent snapshots.",
        task: "Give a text editor snapshots that can be restored later.",
        result: "The editor emits opaque snapshots and restores from them on demand.",
        code: "struct Editor { text: String }\nstruct Snapshot(String);\nimpl Editor {\n    fn save(&self) -> Snapshot { Snapshot(self.text.clone()) }\n    fn restore(&mut self, s: Snapshot) { self.text = s.0; }\n}\n",
    },
    Entry {
        id: 19,
        title: "Observer",
        category: Behavioral,
        description: "Defines a subscription mechanism that notifies dependents whenever an object's state changes.",
        pros_cons: "Pros: publishers and subscribers are loosely coupled; subscribers added at runtime.\nCons: notification order is not guaranteed.",
        task: "Notify listeners whenever a store receives a new product.",
        result: "Subscribers receive every event without the store knowing their types.",
        code: "struct Store { listeners: Vec<Box<dyn Fn(&str)>> }\nimpl Store {\n    fn subscribe(&mut self, f: impl Fn(&str) + 'static) { self.listeners.push(Box::new(f)); }\n    fn publish(&self, item: &str) { self.listeners.iter().for_each(|l| l(item)); }\n}\n",
    },
    Entry {
        id: 20,
        title: "State",
        category: Behavioral,
        description: "Lets an object change its behaviour when its internal state changes, as if it changed its type.",
        pros_cons: "Pros: state-specific behaviour in separate types; removes large conditionals.\nCons: overkill with few states.",
        task: "Model a document that moves between draft, moderation and published.",
        result: "Each state decides what publish does, so transitions stay explicit.",
        code: "enum Doc { Draft, Moderation, Published }\nimpl Doc {\n    fn publish(self) -> Doc {\n        match self {\n            Doc::Draft => Doc::Moderation,\n            Doc::Moderation | Doc::Published => Doc::Published,\n        }\n    }\n}\n",
    },
    Entry {
        id: 21,
        title: "Strategy",
        category: Behavioral,
        description: "Defines a family of interchangeable algorithms and lets the caller pick one at runtime.",
        pros_cons: "Pros: swap algorithms at runtime; isolates algorithm details.\nCons: clients must know the differences between strategies.",
        task: "Sort data with a strategy chosen by the caller.",
        result: "The context delegates sorting to whichever strategy it holds.",
        code: "trait SortStrategy { fn sort(&self, data: &mut [i32]); }\nstruct Context<S: SortStrategy> { strategy: S }\nimpl<S: SortStrategy> Context<S> {\n    fn run(&self, data: &mut [i32]) { self.strategy.sort(data); }\n}\n",
    },
    Entry {
        id: 22,
        title: "Template method",
        category: Behavioral,
        description: "Defines the skeleton of an algorithm in a base routine and lets implementers override specific steps.",
        pros_cons: "Pros: reuse of the invariant algorithm; overrides only where needed.\nCons: the skeleton limits flexibility.",
        task: "Prepare tea and coffee with a shared recipe and drink-specific steps.",
        result: "The common steps run once; brew and condiments differ per drink.",
        code: "trait Beverage {\n    fn brew(&self);\n    fn condiments(&self);\n    fn prepare(&self) { boil_water(); self.brew(); pour(); self.condiments(); }\n}\n",
    },
    Entry {
        id: 23,
        title: "Visitor",
        category: Behavioral,
        description: "Separates an algorithm from the object structure it operates on.",
        pros_cons: "Pros: new operations without changing element types.\nCons: adding element types requires updating every visitor.",
        task: "Export a set of shapes to XML without touching the shape types.",
        result: "Each shape accepts a visitor that implements the export.",
        code: "trait Visitor { fn circle(&mut self, r: f64); fn square(&mut self, side: f64); }\nenum Shape { Circle(f64), Square(f64) }\nimpl Shape {\n    fn accept(&self, v: &mut dyn Visitor) {\n        match self { Shape::Circle(r) => v.circle(*r), Shape::Square(s) => v.square(*s) }\n    }\n}\n",
    },
];
