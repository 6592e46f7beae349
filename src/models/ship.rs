use super::component::{Component, ComponentKind, ComponentType};
use super::constants::{ENEMY_POWER_LIMIT, FALLBACK_HIT_THRESHOLD, PLAYER_POWER_LIMIT};
use super::errors::{GameError, GameResult};

/// Power-budgeted collection of installed components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentContainer {
    power_limit: u32,
    components: Vec<Component>,
}

impl ComponentContainer {
    pub fn new(power_limit: u32) -> Self {
        ComponentContainer {
            power_limit,
            components: Vec::new(),
        }
    }

    pub fn power_limit(&self) -> u32 {
        self.power_limit
    }

    /// Power drawn by every installed component, destroyed ones included
    pub fn total_power(&self) -> u32 {
        self.components.iter().map(|c| c.power_cost).sum()
    }

    pub fn remaining_power(&self) -> u32 {
        self.power_limit.saturating_sub(self.total_power())
    }

    /// Install a component, rejecting duplicate names, power overruns and a
    /// second bridge.
    pub fn add_component(&mut self, component: Component) -> GameResult<()> {
        if self.components.iter().any(|c| c.name == component.name) {
            return Err(GameError::InvalidConfiguration(format!(
                "component {} is already installed",
                component.name
            )));
        }
        if component.component_type() == ComponentType::Bridge
            && self.has_component_type(ComponentType::Bridge)
        {
            return Err(GameError::DuplicateBridge);
        }
        let available = self.remaining_power();
        if component.power_cost > available {
            return Err(GameError::PowerBudgetExceeded {
                required: component.power_cost,
                available,
            });
        }
        self.components.push(component);
        Ok(())
    }

    pub fn remove_component(&mut self, name: &str) -> GameResult<Component> {
        let pos = self
            .components
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| GameError::ComponentNotFound(name.to_string()))?;
        Ok(self.components.remove(pos))
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name == name)
    }

    pub fn components_by_type(&self, ty: ComponentType) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.component_type() == ty)
    }

    pub fn has_component_type(&self, ty: ComponentType) -> bool {
        self.components_by_type(ty).next().is_some()
    }

    pub fn active_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.is_active())
    }

    /// True when at least one component is installed and all are destroyed
    pub fn all_destroyed(&self) -> bool {
        !self.components.is_empty() && self.components.iter().all(Component::is_destroyed)
    }
}

/// A combat ship. Player and enemy ships differ only in loadout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ship {
    pub name: String,
    container: ComponentContainer,
}

impl Ship {
    pub fn new(name: impl Into<String>, power_limit: u32) -> Self {
        Ship {
            name: name.into(),
            container: ComponentContainer::new(power_limit),
        }
    }

    /// Build a ship, validating each component against the container rules
    pub fn with_components(
        name: impl Into<String>,
        power_limit: u32,
        components: Vec<Component>,
    ) -> GameResult<Self> {
        let mut ship = Ship::new(name, power_limit);
        for component in components {
            ship.install(component)?;
        }
        Ok(ship)
    }

    /// The player's starting loadout
    pub fn player() -> Self {
        Ship::from_loadout(
            "Wayfarer",
            PLAYER_POWER_LIMIT,
            vec![
                Component::weapon("Pulse Laser", 3, 4, 2, 4),
                Component::engine("Ion Drive", 3, 3, 1),
                Component::bridge("Command Bridge", 4, 3, 1),
            ],
        )
    }

    /// Sentry loadout, scaled by the enemy's board value (1 to 10)
    pub fn enemy(value: u8) -> Self {
        let value = u32::from(value);
        let accuracy = if value >= 7 { 3 } else { 4 };
        Ship::from_loadout(
            format!("Sentry Mk{}", value),
            ENEMY_POWER_LIMIT,
            vec![
                Component::weapon("Raider Cannon", 2 + value / 4, 4, 1 + value / 5, accuracy),
                Component::engine("Thrusters", 2, 3, 0),
                Component::bridge("Sentry Core", 3 + value / 3, 3, 0),
            ],
        )
    }

    // Loadouts above are within budget and carry one bridge.
    fn from_loadout(name: impl Into<String>, power_limit: u32, components: Vec<Component>) -> Self {
        Ship {
            name: name.into(),
            container: ComponentContainer {
                power_limit,
                components,
            },
        }
    }

    pub fn container(&self) -> &ComponentContainer {
        &self.container
    }

    pub fn components(&self) -> &[Component] {
        self.container.components()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.container.get(name)
    }

    pub fn install(&mut self, component: Component) -> GameResult<()> {
        self.container.add_component(component)
    }

    /// Remove a component; uninstalled parts come back fully repaired.
    pub fn uninstall(&mut self, name: &str) -> GameResult<Component> {
        let mut component = self.container.remove_component(name)?;
        component.repair();
        Ok(component)
    }

    /// First non-destroyed weapon
    pub fn active_weapon(&self) -> Option<&Component> {
        self.container
            .components_by_type(ComponentType::Weapon)
            .find(|c| c.is_active())
    }

    pub fn can_attack(&self) -> bool {
        self.active_weapon().is_some()
    }

    pub fn can_flee(&self) -> bool {
        self.container
            .components_by_type(ComponentType::Engine)
            .any(Component::is_active)
    }

    /// A ship without a bridge has nothing to lose here; see `all_destroyed`.
    pub fn is_bridge_destroyed(&self) -> bool {
        self.container
            .components_by_type(ComponentType::Bridge)
            .any(Component::is_destroyed)
    }

    pub fn all_destroyed(&self) -> bool {
        self.container.all_destroyed()
    }

    pub fn active_components(&self) -> impl Iterator<Item = &Component> {
        self.container.active_components()
    }

    /// Minimum roll to hit, from the active weapon or the fallback threshold
    pub fn hit_threshold(&self) -> u8 {
        match self.active_weapon().map(|c| c.kind) {
            Some(ComponentKind::Weapon { accuracy, .. }) => accuracy,
            _ => FALLBACK_HIT_THRESHOLD,
        }
    }

    pub fn weapon_damage(&self) -> u32 {
        match self.active_weapon().map(|c| c.kind) {
            Some(ComponentKind::Weapon { damage, .. }) => damage,
            _ => 0,
        }
    }

    /// Extra movement from working engines
    pub fn speed_bonus(&self) -> u32 {
        self.container
            .active_components()
            .map(|c| match c.kind {
                ComponentKind::Engine { speed_bonus } => speed_bonus,
                _ => 0,
            })
            .sum()
    }

    pub fn evasion(&self) -> u32 {
        self.container
            .active_components()
            .map(|c| match c.kind {
                ComponentKind::Bridge { evasion_bonus } => evasion_bonus,
                _ => 0,
            })
            .sum()
    }

    /// Damage a named component. Returns whether this hit destroyed it.
    pub fn take_hit(&mut self, name: &str, damage: u32) -> GameResult<bool> {
        let component = self
            .container
            .get_mut(name)
            .ok_or_else(|| GameError::ComponentNotFound(name.to_string()))?;
        Ok(component.take_damage(damage))
    }
}
