/// Kind-specific stats of a ship component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// `accuracy` is the minimum die roll that hits
    Weapon { damage: u32, accuracy: u8 },
    Engine { speed_bonus: u32 },
    Bridge { evasion_bonus: u32 },
}

/// Payload-free tag used to query components by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Weapon,
    Engine,
    Bridge,
}

impl ComponentType {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentType::Weapon => "WEAPON",
            ComponentType::Engine => "ENGINE",
            ComponentType::Bridge => "BRIDGE",
        }
    }
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Weapon { .. } => ComponentType::Weapon,
            ComponentKind::Engine { .. } => ComponentType::Engine,
            ComponentKind::Bridge { .. } => ComponentType::Bridge,
        }
    }
}

/// An installable ship part. Destroyed components stay installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub power_cost: u32,
    pub kind: ComponentKind,
    max_hp: u32,
    current_hp: u32,
}

impl Component {
    pub fn new(name: impl Into<String>, max_hp: u32, power_cost: u32, kind: ComponentKind) -> Self {
        Component {
            name: name.into(),
            power_cost,
            kind,
            max_hp,
            current_hp: max_hp,
        }
    }

    pub fn weapon(
        name: impl Into<String>,
        max_hp: u32,
        power_cost: u32,
        damage: u32,
        accuracy: u8,
    ) -> Self {
        Self::new(name, max_hp, power_cost, ComponentKind::Weapon { damage, accuracy })
    }

    pub fn engine(name: impl Into<String>, max_hp: u32, power_cost: u32, speed_bonus: u32) -> Self {
        Self::new(name, max_hp, power_cost, ComponentKind::Engine { speed_bonus })
    }

    pub fn bridge(
        name: impl Into<String>,
        max_hp: u32,
        power_cost: u32,
        evasion_bonus: u32,
    ) -> Self {
        Self::new(name, max_hp, power_cost, ComponentKind::Bridge { evasion_bonus })
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    pub fn is_destroyed(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_active(&self) -> bool {
        !self.is_destroyed()
    }

    /// Apply damage, flooring HP at zero.
    /// Returns true only if this hit destroyed the component.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_active = self.is_active();
        self.current_hp = self.current_hp.saturating_sub(amount);
        was_active && self.is_destroyed()
    }

    pub fn repair(&mut self) {
        self.current_hp = self.max_hp;
    }
}
