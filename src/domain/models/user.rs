/// Value object representing a hashed password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: i32,
    name: String,
    password_hash: HashedPassword,
}

impl User {
    pub fn new(id: i32, name: String, password_hash: HashedPassword) -> Self {
        Self {
            id,
            name,
            password_hash,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}
