//! Static server-output corpora used across harnesses.
//!
//! Each corpus pairs a raw console line with the [`MessageType`] the named
//! variant must assign to it.

use craftlog_core::MessageType;

/// Vanilla console output across the 1.6 / 1.7.2+ / log-file formats.
pub const CORPUS_VANILLA: &[(&str, MessageType)] = &[
    ("2013-08-01 12:00:00 [INFO] Starting minecraft server version 1.6.2", MessageType::Info),
    ("2013-08-01 12:00:00 [WARNING] **** FAILED TO BIND TO PORT!", MessageType::Warning),
    ("2013-08-01 12:00:01 [SEVERE] Perhaps a server is already running on that port?", MessageType::Severe),
    ("[12:30:01] [Server thread/INFO]: Bertware[/127.0.0.1:58189] logged in with entity id 27 at (-1001.0, 2.0, 1409.3)", MessageType::PlayerJoin),
    ("[12:30:02] [Server thread/INFO]: Bertware joined the game", MessageType::Info),
    ("[12:31:10] [Server thread/INFO]: Bertware lost connection: Disconnected", MessageType::PlayerLeave),
    ("[12:31:10] [Server thread/INFO]: Bertware left the game.", MessageType::PlayerLeave),
    ("[12:32:00] [Server thread/INFO]: Griefer42 lost connection: Banned by admin.", MessageType::PlayerBan),
    ("[12:32:05] [Server thread/WARN]: Can't keep up! Did the system time change, or is the server overloaded?", MessageType::Warning),
    ("[12:33:00] [Server thread/ERROR]: Encountered an unexpected exception", MessageType::Severe),
    // The thread marker must contain "thread", so other thread names leave no info tag.
    ("[12:34:00] [User Authenticator #1/INFO]: UUID of player Bertware is f0b27a33-6939-4b25-ab89-7aa4e4db83c1", MessageType::Unknown),
    ("[12:35:00] [Server thread/INFO] [minecraft/DedicatedServer]: Done (3.2s)!", MessageType::Info),
    ("\tat net.minecraft.server.MinecraftServer.run(MinecraftServer.java:564)", MessageType::Unknown),
    ("", MessageType::Unknown),
    ("random unstructured text", MessageType::Unknown),
];

/// CraftBukkit / Paper output, including lines only plugin servers classify.
pub const CORPUS_PLUGIN_SERVER: &[(&str, MessageType)] = &[
    ("[11:36:21 INFO]: Loading properties", MessageType::Info),
    ("[11:36:22 INFO]: There are 1/20 players online:", MessageType::PlayerList),
    ("[11:36:22 INFO]: There are 3 out of maximum 20 players online.", MessageType::PlayerList),
    ("[11:36:23 WARN]: Plugin EssentialsX generated an exception", MessageType::Warning),
    ("java.lang.IllegalStateException: Asynchronous entity add!", MessageType::JavaStackTrace),
    ("\tat org.bukkit.craftbukkit.v1_19_R1.CraftWorld.addEntity(CraftWorld.java:1411)", MessageType::JavaStackTrace),
    ("Caused by: java.lang.NullPointerException", MessageType::JavaStackTrace),
    ("\t... 15 more", MessageType::JavaStackTrace),
    ("Picked up _JAVA_OPTIONS: -Xmx2G", MessageType::JavaStatus),
    ("[11:36:24 INFO]: Bertware[/192.168.1.20:61234] logged in with entity id 88 at ([world]0.5, 65.0, 0.5)", MessageType::PlayerJoin),
    ("[11:36:30 INFO]: Bertware left the game.", MessageType::PlayerLeave),
];

/// Forge output with logger-source tags.
pub const CORPUS_FORGE: &[(&str, MessageType)] = &[
    ("[09:00:00] [Server thread/INFO] [minecraft/DedicatedServer]: Starting minecraft server version 1.12.2", MessageType::Info),
    ("[09:00:01] [Server thread/WARN] [FML]: The declared version check handler method checkModLists on network mod id ironchest is not accessible", MessageType::Warning),
    ("[09:01:00] [Server thread/INFO] [minecraft/PlayerList]: Bertware[/10.0.0.7:50123] logged in with entity id 311 at (1.5, 64.0, -3.5)", MessageType::PlayerJoin),
    ("[09:02:00] [Server thread/INFO] [minecraft/NetHandlerPlayServer]: Bertware lost connection: Disconnected", MessageType::PlayerLeave),
    ("[09:02:00] [Server thread/INFO] [minecraft/MinecraftServer]: Bertware left the game.", MessageType::PlayerLeave),
];

/// Generate `n` synthetic vanilla lines for throughput and burst tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 10 {
            0 => format!("[{:02}:{:02}:{:02}] [Server thread/WARN]: Can't keep up! Running {i}ms behind", i / 3600 % 24, i / 60 % 60, i % 60),
            1 => format!("[{:02}:{:02}:{:02}] [Server thread/INFO]: Player{i}[/10.0.{}.{}:25565] logged in with entity id {i} at (0.0, 64.0, 0.0)", i / 3600 % 24, i / 60 % 60, i % 60, i / 256 % 256, i % 256),
            2 => format!("[{:02}:{:02}:{:02}] [Server thread/INFO]: Player{i} left the game.", i / 3600 % 24, i / 60 % 60, i % 60),
            _ => format!("[{:02}:{:02}:{:02}] [Server thread/INFO]: Saving chunks for level 'world'/overworld ({i})", i / 3600 % 24, i / 60 % 60, i % 60),
        })
        .collect()
}
