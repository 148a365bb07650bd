//! In-memory page used by test suites.
//!
//! [`FakeDom`] implements [`DomAccessor`] over a small node tree with a
//! selector matcher that understands tag names, class chains and the
//! descendant combinator, which is all the PokerNow selectors use.
//! [`TablePage`] builds a tree shaped like the PokerNow table.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use pokernow_protocols::{DomAccessor, DomError, ElementHandle};

/// Index of a node inside a [`FakeDom`].
pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct FakeNode {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    displayed: bool,
    present: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl FakeNode {
    fn describe(&self) -> String {
        let mut out = self.tag.clone();
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        out
    }
}

#[derive(Debug)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector
        .split_whitespace()
        .map(|part| {
            let mut pieces = part.split('.');
            let tag = pieces.next().filter(|t| !t.is_empty()).map(str::to_string);
            Compound {
                tag,
                classes: pieces.map(str::to_string).collect(),
            }
        })
        .collect()
}

/// In-memory [`DomAccessor`].
#[derive(Debug)]
pub struct FakeDom {
    nodes: RwLock<Vec<FakeNode>>,
    reveal_on_click: Mutex<HashMap<NodeId, Vec<NodeId>>>,
    clicks: Mutex<Vec<String>>,
    fills: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<DomError>>,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDom {
    pub fn new() -> Self {
        let root = FakeNode {
            tag: "html".to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            displayed: true,
            present: true,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: RwLock::new(vec![root]),
            reveal_on_click: Mutex::new(HashMap::new()),
            clicks: Mutex::new(Vec::new()),
            fills: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Append a node under `parent`. `classes` is a space separated list.
    pub fn add(&self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let mut nodes = self.nodes.write();
        let id = nodes.len();
        nodes.push(FakeNode {
            tag: tag.to_string(),
            classes: classes.split_whitespace().map(str::to_string).collect(),
            attrs: BTreeMap::new(),
            text: String::new(),
            displayed: true,
            present: true,
            parent: Some(parent),
            children: Vec::new(),
        });
        nodes[parent].children.push(id);
        id
    }

    /// Append a node with text content.
    pub fn add_text(&self, parent: NodeId, tag: &str, classes: &str, text: &str) -> NodeId {
        let id = self.add(parent, tag, classes);
        self.set_text(id, text);
        id
    }

    pub fn set_text(&self, id: NodeId, text: &str) {
        self.nodes.write()[id].text = text.to_string();
    }

    pub fn set_attr(&self, id: NodeId, name: &str, value: &str) {
        self.nodes.write()[id]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_class(&self, id: NodeId, class: &str) {
        self.nodes.write()[id].classes.push(class.to_string());
    }

    pub fn set_displayed(&self, id: NodeId, displayed: bool) {
        self.nodes.write()[id].displayed = displayed;
    }

    /// Detach a node (and its subtree) from queries without deleting it.
    pub fn set_present(&self, id: NodeId, present: bool) {
        self.nodes.write()[id].present = present;
    }

    /// Make `target` present once `trigger` is clicked.
    pub fn reveal_on_click(&self, trigger: NodeId, target: NodeId) {
        self.reveal_on_click
            .lock()
            .entry(trigger)
            .or_default()
            .push(target);
    }

    /// Make every subsequent accessor call fail with `error`.
    pub fn fail_with(&self, error: DomError) {
        *self.failure.lock() = Some(error);
    }

    /// Descriptions (`tag.class.class`) of clicked nodes, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().clone()
    }

    /// `(description, text)` of filled inputs, in order.
    pub fn fills(&self) -> Vec<(String, String)> {
        self.fills.lock().clone()
    }

    /// First present node matching `selector`.
    pub fn find(&self, selector: &str) -> Option<NodeId> {
        self.find_all(selector, ROOT).into_iter().next()
    }

    fn check(&self) -> Result<(), DomError> {
        match self.failure.lock().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn handle(id: NodeId) -> ElementHandle {
        ElementHandle::new(format!("node-{}", id))
    }

    fn resolve(&self, handle: &ElementHandle) -> Result<NodeId, DomError> {
        let id = handle
            .id()
            .strip_prefix("node-")
            .and_then(|n| n.parse::<NodeId>().ok())
            .ok_or_else(|| DomError::ElementNotFound(handle.id().to_string()))?;
        let len = self.nodes.read().len();
        if id < len && self.is_attached(id) {
            Ok(id)
        } else {
            Err(DomError::ElementNotFound(handle.id().to_string()))
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let nodes = self.nodes.read();
        let mut current = Some(id);
        while let Some(node) = current {
            if !nodes[node].present {
                return false;
            }
            current = nodes[node].parent;
        }
        true
    }

    /// Present descendants of `scope` in document order.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.read();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if !nodes[id].present {
                continue;
            }
            out.push(id);
            stack.extend(nodes[id].children.iter().rev().copied());
        }
        out
    }

    fn matches_compound(node: &FakeNode, compound: &Compound) -> bool {
        compound.tag.as_ref().is_none_or(|t| *t == node.tag)
            && compound.classes.iter().all(|c| node.classes.contains(c))
    }

    fn matches(&self, id: NodeId, compounds: &[Compound]) -> bool {
        let nodes = self.nodes.read();
        let Some((last, ancestors)) = compounds.split_last() else {
            return false;
        };
        if !Self::matches_compound(&nodes[id], last) {
            return false;
        }

        let mut current = nodes[id].parent;
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    Some(node) => {
                        current = nodes[node].parent;
                        if Self::matches_compound(&nodes[node], compound) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }

    fn find_all(&self, selector: &str, scope: NodeId) -> Vec<NodeId> {
        let compounds = parse_selector(selector);
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, &compounds))
            .collect()
    }

    fn scope_id(&self, scope: Option<&ElementHandle>) -> Result<NodeId, DomError> {
        match scope {
            Some(handle) => self.resolve(handle),
            None => Ok(ROOT),
        }
    }

    fn inner_text(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        {
            let nodes = self.nodes.read();
            if !nodes[id].text.is_empty() {
                parts.push(nodes[id].text.clone());
            }
        }
        for child in self.descendants(id) {
            let nodes = self.nodes.read();
            if !nodes[child].text.is_empty() {
                parts.push(nodes[child].text.clone());
            }
        }
        parts.join(" ").trim().to_string()
    }
}

#[async_trait]
impl DomAccessor for FakeDom {
    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Option<ElementHandle>, DomError> {
        self.check()?;
        let scope = self.scope_id(scope)?;
        Ok(self
            .find_all(selector, scope)
            .into_iter()
            .next()
            .map(Self::handle))
    }

    async fn query_all(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementHandle>, DomError> {
        self.check()?;
        let scope = self.scope_id(scope)?;
        Ok(self
            .find_all(selector, scope)
            .into_iter()
            .map(Self::handle)
            .collect())
    }

    async fn text(&self, element: &ElementHandle) -> Result<String, DomError> {
        self.check()?;
        let id = self.resolve(element)?;
        Ok(self.inner_text(id))
    }

    async fn attr(&self, element: &ElementHandle, name: &str) -> Result<Option<String>, DomError> {
        self.check()?;
        let id = self.resolve(element)?;
        let nodes = self.nodes.read();
        let node = &nodes[id];
        if name == "class" {
            return Ok(Some(node.classes.join(" ")));
        }
        Ok(node.attrs.get(name).cloned())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, DomError> {
        self.check()?;
        let id = self.resolve(element)?;
        Ok(self.nodes.read()[id].displayed)
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), DomError> {
        self.check()?;
        let id = self.resolve(element)?;
        self.clicks.lock().push(self.nodes.read()[id].describe());
        let revealed = self.reveal_on_click.lock().remove(&id).unwrap_or_default();
        for target in revealed {
            self.set_present(target, true);
        }
        Ok(())
    }

    async fn fill(&self, element: &ElementHandle, text: &str) -> Result<(), DomError> {
        self.check()?;
        let id = self.resolve(element)?;
        let description = self.nodes.read()[id].describe();
        self.set_attr(id, "value", text);
        self.fills.lock().push((description, text.to_string()));
        Ok(())
    }

    async fn wait_for(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Option<ElementHandle>, DomError> {
        self.query(selector, None).await
    }
}

/// State of an action button on a [`TablePage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Enabled,
    Disabled,
    Hidden,
}

#[derive(Debug, Clone, Default)]
struct SeatFixture {
    name: Option<String>,
    stack: Option<String>,
    bet: Option<String>,
    classes: Vec<String>,
    action: Option<String>,
    cards: Vec<String>,
    dealer_child: bool,
}

/// Builder for a [`FakeDom`] shaped like the PokerNow table page.
#[derive(Debug, Clone, Default)]
pub struct TablePage {
    seats: Vec<SeatFixture>,
    dealer_position: Option<usize>,
    blinds: Vec<String>,
    pot: Option<String>,
    community: Vec<String>,
    buttons: Vec<(String, ButtonState)>,
    fold_confirmation: bool,
}

impl TablePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupied seat. `classes` are added next to `table-player`.
    pub fn seat(mut self, name: &str, stack: &str, bet: Option<&str>, classes: &[&str]) -> Self {
        self.seats.push(SeatFixture {
            name: Some(name.to_string()),
            stack: Some(stack.to_string()),
            bet: bet.map(str::to_string),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        });
        self
    }

    /// Seat slot with no player.
    pub fn empty_seat(mut self) -> Self {
        self.seats.push(SeatFixture::default());
        self
    }

    /// Seat showing a name but no stack (joining, standing up).
    pub fn seat_without_stack(mut self, name: &str) -> Self {
        self.seats.push(SeatFixture {
            name: Some(name.to_string()),
            ..Default::default()
        });
        self
    }

    /// Put the table dealer button on 1-based seat `position`.
    pub fn dealer_at(mut self, position: usize) -> Self {
        self.dealer_position = Some(position);
        self
    }

    /// Render a dealer marker inside seat `index` (0-based).
    pub fn dealer_inside(mut self, index: usize) -> Self {
        self.seats[index].dealer_child = true;
        self
    }

    pub fn seat_action(mut self, index: usize, text: &str) -> Self {
        self.seats[index].action = Some(text.to_string());
        self
    }

    /// Cards of the viewing player, rendered in hovered seat `index`.
    pub fn your_cards(mut self, index: usize, cards: &[&str]) -> Self {
        self.seats[index].classes.push("player-hover".to_string());
        self.seats[index].cards = cards.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn blinds(mut self, blinds: &[&str]) -> Self {
        self.blinds = blinds.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn pot(mut self, pot: &str) -> Self {
        self.pot = Some(pot.to_string());
        self
    }

    /// Community cards as raw class attributes.
    pub fn community(mut self, cards: &[&str]) -> Self {
        self.community = cards.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Decision button with class `class` (`call`, `raise`, `check`, `fold`).
    pub fn button(mut self, class: &str, state: ButtonState) -> Self {
        self.buttons.push((class.to_string(), state));
        self
    }

    /// Show a confirmation dialog after fold is clicked.
    pub fn fold_confirmation(mut self) -> Self {
        self.fold_confirmation = true;
        self
    }

    pub fn build(self) -> FakeDom {
        let dom = FakeDom::new();
        let table = dom.add(dom.root(), "div", "table");

        for (index, seat) in self.seats.iter().enumerate() {
            let classes = format!("table-player table-player-{} {}", index + 1, seat.classes.join(" "));
            let node = dom.add(table, "div", &classes);

            if let Some(name) = &seat.name {
                let name_ctn = dom.add(node, "div", "table-player-name");
                dom.add_text(name_ctn, "a", "", name);
            }
            if let Some(stack) = &seat.stack {
                let stack_ctn = dom.add(node, "div", "table-player-stack");
                dom.add_text(stack_ctn, "span", "chips-value", stack);
            }
            if let Some(bet) = &seat.bet {
                let bet_ctn = dom.add(node, "div", "table-player-bet-value");
                dom.add_text(bet_ctn, "span", "chips-value", bet);
            }
            if let Some(action) = &seat.action {
                dom.add_text(node, "div", "player-action", action);
            }
            if seat.dealer_child {
                dom.add(node, "div", "dealer-button-ctn");
            }
            if !seat.cards.is_empty() {
                let cards = dom.add(node, "div", "table-player-cards");
                for card in &seat.cards {
                    dom.add(cards, "div", &format!("card-container {}", card));
                }
            }
        }

        if let Some(position) = self.dealer_position {
            dom.add(
                table,
                "div",
                &format!("dealer-button-ctn dealer-position-{}", position),
            );
        }

        if !self.blinds.is_empty() {
            let blinds = dom.add(table, "div", "blind-value-ctn");
            for blind in &self.blinds {
                dom.add_text(blinds, "span", "chips-value", blind);
            }
        }

        if let Some(pot) = &self.pot {
            let pot_ctn = dom.add(table, "div", "table-pot-size");
            dom.add_text(pot_ctn, "span", "chips-value", pot);
        }

        if !self.community.is_empty() {
            let cards = dom.add(table, "div", "table-cards");
            for card in &self.community {
                dom.add(cards, "div", &format!("card-container {}", card));
            }
        }

        let decisions = dom.add(dom.root(), "div", "game-decisions-ctn");
        for (class, state) in &self.buttons {
            let button = dom.add(decisions, "button", &format!("button-1 {}", class));
            match state {
                ButtonState::Enabled => {}
                ButtonState::Disabled => dom.set_attr(button, "disabled", "true"),
                ButtonState::Hidden => dom.set_displayed(button, false),
            }

            if class == "raise" {
                let form = dom.add(dom.root(), "form", "raise-controller-form");
                let input_ctn = dom.add(form, "div", "value-input-ctn");
                dom.add(input_ctn, "input", "value");
                dom.add(form, "button", "button-1 bet");
                dom.set_present(form, false);
                dom.reveal_on_click(button, form);
            }

            if class == "fold" && self.fold_confirmation {
                let alert = dom.add(dom.root(), "div", "alert-1-buttons");
                dom.add(alert, "button", "button-1 middle-gray");
                dom.set_present(alert, false);
                dom.reveal_on_click(button, alert);
            }
        }

        dom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_selector_descendant_and_class_chain() {
        let dom = TablePage::new()
            .seat("alice", "100", None, &["decision-current"])
            .seat("bob", "200", None, &[])
            .build();

        let current = dom.query(".table-player.decision-current", None).await.unwrap();
        assert!(current.is_some());
        let name = dom
            .text_of(".table-player-name a", current.as_ref())
            .await
            .unwrap();
        assert_eq!(name, "alice");

        let seats = dom.query_all(".table-player", None).await.unwrap();
        assert_eq!(seats.len(), 2);
    }

    #[tokio::test]
    async fn test_hidden_nodes_are_revealed_on_click() {
        let dom = TablePage::new().button("raise", ButtonState::Enabled).build();
        assert!(dom.query(".raise-controller-form .bet", None).await.unwrap().is_none());

        let raise = dom
            .query(".game-decisions-ctn .button-1.raise", None)
            .await
            .unwrap()
            .unwrap();
        dom.click(&raise).await.unwrap();

        assert!(dom.query(".raise-controller-form .bet", None).await.unwrap().is_some());
        assert_eq!(dom.clicks(), vec!["button.button-1.raise".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let dom = FakeDom::new();
        dom.fail_with(DomError::SessionClosed);
        assert_eq!(dom.query("div", None).await, Err(DomError::SessionClosed));
    }
}
