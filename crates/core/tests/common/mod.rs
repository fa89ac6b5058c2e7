#![allow(dead_code)]

use std::path::Path;

/// Community side, flat format: two class files plus a member file.
pub const COMMUNITY_CLASSES: &str = "\
# community class list
a net/minecraft/server/Block
b net/minecraft/server/BlockStone
c net/minecraft/server/World
d net/minecraft/server/Entity
";

pub const COMMUNITY_MEMBERS: &str = "\
net/minecraft/server/Block f strength
net/minecraft/server/Block m (I)V tick
net/minecraft/server/Unknown x y
";

/// Canonical side, retrace format.
pub const CANONICAL: &str = "\
# compiler: R8
net.minecraft.world.level.block.Block -> a:
    float hardness -> f
    1:1:void <init>() -> <init>
    void randomTick() -> m
    void tick(int) -> m
    2:5:boolean canSurvive(net.minecraft.world.level.Level,int[]) -> s
    void place(net.minecraft.world.entity.Entity) -> p
net.minecraft.world.level.block.StoneBlock -> b:
    int variant -> v
net.minecraft.world.level.Level -> c:
    java.util.List entities -> e
net.minecraft.world.entity.Entity -> d:
    void remove() -> r
";

pub fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

pub fn write_fixture(dir: &Path) {
    write(dir, "classes.csrg", COMMUNITY_CLASSES);
    write(dir, "members.csrg", COMMUNITY_MEMBERS);
    write(dir, "server.txt", CANONICAL);
}
