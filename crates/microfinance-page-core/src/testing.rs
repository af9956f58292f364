//! In-memory document and manual clock for driving the controller in tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use futures::executor::LocalPool;

use crate::dom::{DomError, PageDom, Sleeper};

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Default)]
struct Node {
    tag: String,
    class_name: String,
    text: String,
    styles: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct DomState {
    nodes: Vec<Node>,
    fields: HashMap<String, String>,
    fail_create: bool,
}

impl DomState {
    fn attached_in_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            if id != ROOT {
                order.push(id);
            }
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        order
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let node = &self.nodes[id];
        match selector.strip_prefix('.') {
            Some(class) => node.class_name.split_whitespace().any(|name| name == class),
            None => node.tag == selector,
        }
    }
}

/// A tiny document tree. Selectors support `.class` and bare tag names.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    state: Rc<RefCell<DomState>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        let state = DomState {
            nodes: vec![Node {
                tag: "body".to_string(),
                ..Node::default()
            }],
            ..DomState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn add_element(&self, parent: NodeId, tag: &str, class_name: &str, text: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = state.nodes.len();
        state.nodes.push(Node {
            tag: tag.to_string(),
            class_name: class_name.to_string(),
            text: text.to_string(),
            parent: Some(parent),
            ..Node::default()
        });
        state.nodes[parent].children.push(id);
        id
    }

    pub fn add_container(&self) -> NodeId {
        self.add_element(ROOT, "main", "container", "")
    }

    pub fn add_flash(&self, parent: NodeId, text: &str) -> NodeId {
        self.add_element(parent, "div", "flash-message success", text)
    }

    pub fn set_field(&self, id: &str, value: &str) {
        self.state
            .borrow_mut()
            .fields
            .insert(id.to_string(), value.to_string());
    }

    pub fn fail_element_creation(&self) {
        self.state.borrow_mut().fail_create = true;
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.state.borrow().nodes[id].styles.get(property).cloned()
    }

    pub fn text(&self, id: NodeId) -> String {
        self.state.borrow().nodes[id].text.clone()
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.state.borrow().nodes[id].class_name.clone()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.state.borrow().nodes[id].children.clone()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.state.borrow().attached_in_order().contains(&id)
    }

    pub fn node_count(&self) -> usize {
        self.state.borrow().nodes.len()
    }
}

impl PageDom for MemoryDom {
    type Element = NodeId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let state = self.state.borrow();
        state
            .attached_in_order()
            .into_iter()
            .filter(|id| state.matches(*id, selector))
            .collect()
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn field_value(&self, id: &str) -> Option<String> {
        self.state.borrow().fields.get(id).cloned()
    }

    fn create_banner(&self, class_name: &str, text: &str) -> Result<NodeId, DomError> {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err(DomError::CreateElement { tag: "div" });
        }
        let id = state.nodes.len();
        state.nodes.push(Node {
            tag: "div".to_string(),
            class_name: class_name.to_string(),
            text: text.to_string(),
            ..Node::default()
        });
        Ok(id)
    }

    fn prepend(&self, container: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        if *container >= state.nodes.len() || *child >= state.nodes.len() {
            return Err(DomError::Insert("unknown node".to_string()));
        }
        state.nodes[*child].parent = Some(*container);
        state.nodes[*container].children.insert(0, *child);
        Ok(())
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        let node = state
            .nodes
            .get_mut(*element)
            .ok_or_else(|| DomError::Style {
                property: property.to_string(),
            })?;
        node.styles.insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn detach(&self, element: &NodeId) {
        let mut state = self.state.borrow_mut();
        let Some(parent) = state.nodes[*element].parent.take() else {
            return;
        };
        state.nodes[parent].children.retain(|child| child != element);
    }
}

#[derive(Debug, Default)]
struct ClockState {
    now: Duration,
    waiters: Vec<(Duration, Waker)>,
}

/// Virtual time. Sleeps complete only when the test advances the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn next_deadline(&self, limit: Duration) -> Option<Duration> {
        self.state
            .borrow()
            .waiters
            .iter()
            .map(|(deadline, _)| *deadline)
            .filter(|deadline| *deadline <= limit)
            .min()
    }

    fn fire(&self, at: Duration) {
        let due = {
            let mut state = self.state.borrow_mut();
            state.now = at;
            let (due, pending): (Vec<_>, Vec<_>) = state
                .waiters
                .drain(..)
                .partition(|(deadline, _)| *deadline <= at);
            state.waiters = pending;
            due
        };
        for (_, waker) in due {
            waker.wake();
        }
    }
}

pub struct ManualSleep {
    clock: ManualClock,
    deadline: Duration,
}

impl Future for ManualSleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.clock.state.borrow_mut();
        if state.now >= self.deadline {
            return Poll::Ready(());
        }
        state.waiters.push((self.deadline, cx.waker().clone()));
        Poll::Pending
    }
}

impl Sleeper for ManualClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        ManualSleep {
            clock: self.clone(),
            deadline: self.now() + duration,
        }
    }
}

/// Advances virtual time to `target`, firing every deadline on the way in
/// order and letting the pool settle after each one.
pub fn run_until(pool: &mut LocalPool, clock: &ManualClock, target: Duration) {
    pool.run_until_stalled();
    while let Some(deadline) = clock.next_deadline(target) {
        clock.fire(deadline);
        pool.run_until_stalled();
    }
    clock.fire(target.max(clock.now()));
    pool.run_until_stalled();
}
