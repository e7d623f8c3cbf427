mod config;
mod form;
mod invoice;
mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in form::definitions()
        .into_iter()
        .chain(invoice::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
    registry.alias("rm", "remove");
}
