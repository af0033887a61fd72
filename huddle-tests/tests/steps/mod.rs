mod negotiation_steps;
mod registry_steps;
mod relay_steps;
