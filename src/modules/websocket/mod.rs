/// Real-time layer: clients authenticate over a websocket, receive
/// targeted notifications, watch playdates for live updates, and
/// exchange presence state.
///
/// - Message protocol (ClientMessage & ServerMessage)
/// - WebSocket Server actor (connections, users, playdate rooms)
/// - WebSocket Session actor (one per connection)
/// - HTTP handler (upgrades the connection)
/// - Presence service (redis-backed online/offline state)
pub mod events;
pub mod handler;
pub mod message;
pub mod presence;
pub mod server;
pub mod session;
