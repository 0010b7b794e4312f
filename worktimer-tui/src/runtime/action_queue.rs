use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use worktimer::Action;

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
